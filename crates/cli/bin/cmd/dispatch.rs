use alloy_primitives::{B256, Bytes, LogData};
use calldata_cli::{Config, utils};
use calldata_dispatch::{MaybeDecodedLog, SelectorRegistry};
use clap::Parser;
use eyre::Result;
use itertools::Itertools;
use std::path::PathBuf;

/// ABI files to register, falling back to the `abis` of the config.
#[derive(Clone, Debug, Default, Parser)]
pub struct AbiOpts {
    /// A JSON ABI or compiler artifact. Functions are registered under the file stem.
    #[arg(long = "abi", value_name = "FILE")]
    pub abis: Vec<PathBuf>,
}

impl AbiOpts {
    fn registry(&self, config: &Config) -> Result<SelectorRegistry> {
        if !self.abis.is_empty() {
            return utils::load_registry(&self.abis);
        }
        let root = std::env::current_dir()?;
        utils::load_registry(&config.abi_paths(&root))
    }
}

/// CLI arguments for `calldata decode-calldata`.
#[derive(Clone, Debug, Parser)]
pub struct DecodeCalldataArgs {
    #[command(flatten)]
    pub abi: AbiOpts,

    /// Only consider functions registered under this ABI file stem.
    #[arg(long)]
    pub owner: Option<String>,

    /// Print the result as JSON.
    #[arg(long, short)]
    pub json: bool,

    /// The hex calldata, including the selector.
    pub data: String,
}

impl DecodeCalldataArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let registry = self.abi.registry(config)?;
        let data = utils::parse_hex(&self.data)?;
        let decoded = registry.decode_calldata(&data, self.owner.as_deref())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&decoded)?);
            return Ok(());
        }
        println!("{}", decoded.function_signature);
        for (name, value) in &decoded.function_arguments {
            println!("  {name}: {value}");
        }
        Ok(())
    }
}

/// CLI arguments for `calldata decode-log`.
#[derive(Clone, Debug, Parser)]
pub struct DecodeLogArgs {
    #[command(flatten)]
    pub abi: AbiOpts,

    /// The log topics, starting with the event topic.
    #[arg(long, num_args = 1.., value_name = "TOPIC")]
    pub topics: Vec<B256>,

    /// The hex log data.
    #[arg(long, default_value = "0x")]
    pub data: String,

    /// Print the result as JSON.
    #[arg(long, short)]
    pub json: bool,
}

impl DecodeLogArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let registry = self.abi.registry(config)?;
        let data = utils::parse_hex(&self.data)?;
        let log = LogData::new_unchecked(self.topics, Bytes::from(data));

        match registry.try_decode_log(log) {
            MaybeDecodedLog::Decoded(decoded) if self.json => {
                println!("{}", serde_json::to_string_pretty(&decoded)?);
            }
            MaybeDecodedLog::Decoded(decoded) => {
                println!("{}", decoded.event);
                for (name, value) in &decoded.args {
                    println!("  {name}: {value}");
                }
            }
            MaybeDecodedLog::Raw(log) => {
                warn!(topics = log.topics().len(), "no matching event, printing raw log");
                for topic in log.topics() {
                    println!("topic: {topic}");
                }
                println!("data:  {}", log.data);
            }
        }
        Ok(())
    }
}

/// CLI arguments for `calldata methods`.
#[derive(Clone, Debug, Parser)]
pub struct MethodsArgs {
    #[command(flatten)]
    pub abi: AbiOpts,
}

impl MethodsArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let registry = self.abi.registry(config)?;
        let entries = registry
            .iter_methods()
            .unique_by(|entry| entry.method.signature())
            .sorted_by(|a, b| a.method.signature().cmp(b.method.signature()));
        for entry in entries {
            let method = &entry.method;
            println!("{}  {:<24} {}", method.selector(), entry.name, method.detailed_signature());
        }
        Ok(())
    }
}
