//! Helpers shared by the subcommands.

use alloy_json_abi::JsonAbi;
use alloy_primitives::hex;
use calldata_codec::{TypeNode, Value};
use calldata_dispatch::SelectorRegistry;
use eyre::{Result, WrapErr};
use std::path::Path;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Initializes a tracing subscriber writing to stderr, filtered by `RUST_LOG`.
pub fn subscriber() {
    let registry = tracing_subscriber::Registry::default()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    if let Err(err) = registry.try_init() {
        eprintln!("failed to initialize tracing: {err}");
    }
}

/// Decodes a hex string, with or without the `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    hex::decode(input.trim()).wrap_err_with(|| format!("invalid hex data `{input}`"))
}

/// Parses command-line arguments against the members of a tuple type.
pub fn parse_args(ty: &TypeNode, args: &[impl AsRef<str>]) -> Result<Vec<Value>> {
    let components = ty.components().unwrap_or_default();
    eyre::ensure!(
        components.len() == args.len(),
        "expected {} arguments for {ty}, got {}",
        components.len(),
        args.len()
    );
    components
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (component, arg))| {
            let arg = arg.as_ref();
            Value::coerce_str(&component.ty, arg).wrap_err_with(|| {
                format!("could not parse argument #{} `{arg}` as {}", i + 1, component.ty)
            })
        })
        .collect()
}

/// Reads a JSON ABI from a file holding either the ABI itself or a compiler artifact with an
/// `abi` field.
pub fn read_abi(path: &Path) -> Result<JsonAbi> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let mut json: serde_json::Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
    if let Some(abi) = json.get_mut("abi") {
        json = abi.take();
    }
    serde_json::from_value(json).wrap_err_with(|| format!("invalid ABI in {}", path.display()))
}

/// Builds a registry from ABI files, registering each file's functions under its file stem.
pub fn load_registry<P: AsRef<Path>>(paths: &[P]) -> Result<SelectorRegistry> {
    eyre::ensure!(
        !paths.is_empty(),
        "no ABI files given; pass `--abi <FILE>` or set `abis` in the config"
    );
    let mut registry = SelectorRegistry::new();
    for path in paths {
        let path = path.as_ref();
        let abi = read_abi(path)?;
        let owner = path.file_stem().and_then(|s| s.to_str());
        registry
            .add_abi(&abi, owner)
            .wrap_err_with(|| format!("failed to register {}", path.display()))?;
        debug!(path = %path.display(), ?owner, "registered ABI");
    }
    Ok(registry)
}
