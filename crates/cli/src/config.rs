//! Configuration loaded from `calldata.toml` and `CALLDATA_*` environment variables.

use calldata_codec::{DecodingRules, EncodingRules};
use figment::{
    Figment, Provider,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    error::Error,
    fmt,
    path::{Path, PathBuf},
};

/// The message prefixed to errors raised while extracting the [`Config`].
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract calldata config:";

/// Settings shared by all subcommands.
///
/// Values are read, in increasing order of precedence, from the defaults, the `calldata.toml`
/// file (or the file named by `CALLDATA_CONFIG`), and `CALLDATA_*` environment variables. Nested
/// keys are separated by a double underscore in environment variables, e.g.
/// `CALLDATA_ENCODING__SHOULD_OPTIMIZE=true`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoding options used by `encode`.
    pub encoding: EncodingRules,
    /// Decoding options used by `decode`.
    pub decoding: DecodingRules,
    /// JSON ABI files registered by the dispatching subcommands when none are given on the
    /// command line.
    pub abis: Vec<PathBuf>,
}

impl Config {
    /// The default name of the config file.
    pub const FILE_NAME: &'static str = "calldata.toml";

    /// The prefix of environment variables read into the config.
    pub const ENV_PREFIX: &'static str = "CALLDATA_";

    /// Loads the config from the current directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_with_root(root)
    }

    /// Loads the config with `root` as the directory holding `calldata.toml`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// The figment of all config sources, without the defaults.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let file = Env::var("CALLDATA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.as_ref().join(Self::FILE_NAME));
        Figment::new()
            .merge(Toml::file(file))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG", "DEBUG"]).split("__"))
    }

    /// Extracts a config from `provider`. Missing keys take their default values.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let config = Figment::from(provider).extract::<Self>().map_err(ExtractConfigError::new)?;
        trace!(target: "calldata::config", ?config, "loaded config");
        Ok(config)
    }

    /// Resolves the configured ABI paths against `root`.
    pub fn abi_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.abis.iter().map(|p| if p.is_absolute() { p.clone() } else { root.join(p) }).collect()
    }
}

/// Represents a failed attempt to extract [`Config`] from a [`Figment`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error.
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unique = HashSet::with_capacity(self.error.count());
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.error.clone() {
            let from_toml = err
                .metadata
                .as_ref()
                .map(|meta| meta.name.contains(Toml::NAME))
                .unwrap_or_default();
            let msg = if from_toml {
                format!("{}: {err}", Config::FILE_NAME)
            } else {
                err.to_string()
            };
            if unique.insert(msg.clone()) {
                writeln!(f, "{msg}")?;
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}
