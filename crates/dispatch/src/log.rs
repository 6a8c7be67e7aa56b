use crate::registry::{SelectorRegistry, serialize_named};
use alloy_primitives::LogData;
use calldata_codec::Value;
use serde::Serialize;

/// A log decoded against a registered event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedLog {
    /// The undecoded log.
    #[serde(skip)]
    pub log: LogData,
    /// The event name.
    pub event: String,
    /// Indexed and body arguments merged in declaration order.
    #[serde(serialize_with = "serialize_named")]
    pub args: Vec<(String, Value)>,
}

/// The outcome of [`SelectorRegistry::try_decode_log`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaybeDecodedLog {
    Decoded(DecodedLog),
    /// The log as it was passed in.
    Raw(LogData),
}

impl MaybeDecodedLog {
    pub fn decoded(&self) -> Option<&DecodedLog> {
        match self {
            Self::Decoded(log) => Some(log),
            Self::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> LogData {
        match self {
            Self::Decoded(decoded) => decoded.log,
            Self::Raw(log) => log,
        }
    }
}

impl SelectorRegistry {
    /// Decodes `log` against the registered events, or hands it back unchanged.
    ///
    /// Logs of unknown events, and logs whose data does not decode, are not an error: a stream of
    /// logs usually contains entries from contracts the registry knows nothing about.
    pub fn try_decode_log(&self, log: LogData) -> MaybeDecodedLog {
        let &[t0, ..] = log.topics() else { return MaybeDecodedLog::Raw(log) };

        for event in self.events(t0, log.topics().len() - 1) {
            match event.decode_log(log.topics(), &log.data) {
                Ok(args) => {
                    return MaybeDecodedLog::Decoded(DecodedLog {
                        event: event.name().to_string(),
                        args,
                        log,
                    });
                }
                Err(err) => {
                    debug!(target: "calldata::dispatch", event = %event.signature(), %err, "failed to decode log");
                }
            }
        }
        MaybeDecodedLog::Raw(log)
    }
}
