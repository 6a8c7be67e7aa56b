use calldata_cli::{Config, utils};
use calldata_codec::{EncodingRules, Method, Value, encode};
use clap::Parser;
use eyre::Result;

/// CLI arguments for `calldata encode`.
#[derive(Clone, Debug, Parser)]
pub struct EncodeArgs {
    /// The function signature, e.g. `transfer(address,uint256)`.
    pub sig: String,

    /// The arguments of the function.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Share identical dynamic values between arguments.
    #[arg(long, short)]
    pub optimize: bool,

    /// Print one annotated line per word instead of hex.
    #[arg(long, short)]
    pub annotate: bool,

    /// Encode the arguments only, without the function selector.
    #[arg(long)]
    pub no_selector: bool,
}

impl EncodeArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        println!("{}", self.encode(config.encoding)?);
        Ok(())
    }

    fn encode(self, rules: EncodingRules) -> Result<String> {
        let Self { sig, args, optimize, annotate, no_selector } = self;
        let rules = EncodingRules {
            should_optimize: rules.should_optimize || optimize,
            should_annotate: rules.should_annotate || annotate,
        };

        let method = Method::parse(&sig)?;
        let values = utils::parse_args(method.inputs(), &args)?;
        let calldata = if no_selector {
            encode(method.inputs(), &Value::Tuple(values), rules)?
        } else {
            method.encode(&values, rules)?
        };
        Ok(calldata.to_string())
    }
}
