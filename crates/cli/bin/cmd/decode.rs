use calldata_cli::{Config, utils};
use calldata_codec::{DecodingRules, Method, Value};
use clap::Parser;
use eyre::Result;
use itertools::Itertools;

/// CLI arguments for `calldata decode`.
#[derive(Clone, Debug, Parser)]
pub struct DecodeArgs {
    /// The function signature, e.g. `balanceOf(address) returns (uint256)`.
    pub sig: String,

    /// The hex data to decode.
    pub data: String,

    /// Decode the data as return values instead of call arguments.
    ///
    /// Return data has no selector.
    #[arg(long, short)]
    pub output: bool,

    /// Reject empty data and dirty padding.
    #[arg(long)]
    pub strict: bool,

    /// Print the values as a JSON object keyed by parameter name.
    #[arg(long, short)]
    pub json: bool,
}

impl DecodeArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        println!("{}", self.decode(config.decoding)?);
        Ok(())
    }

    fn decode(self, mut rules: DecodingRules) -> Result<String> {
        let Self { sig, data, output, strict, json } = self;
        rules.is_strict_mode |= strict;
        rules.should_convert_structs_to_objects |= json;

        let method = Method::parse(&sig)?;
        let data = utils::parse_hex(&data)?;
        let (ty, values) = if output {
            (method.outputs(), method.decode_return_values(&data, rules)?)
        } else {
            (method.inputs(), method.decode(&data, rules)?)
        };

        if json {
            let object = ty
                .field_names()
                .into_iter()
                .zip(values)
                .map(|(name, value)| Ok((name, serde_json::to_value(value)?)))
                .collect::<Result<serde_json::Map<_, _>>>()?;
            return Ok(serde_json::to_string_pretty(&object)?);
        }
        Ok(values.iter().map(|v| format!("{v:#}")).join("\n"))
    }
}
