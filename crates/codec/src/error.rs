//! Errors produced while parsing, encoding and decoding.

use alloy_primitives::Selector;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = AbiError> = std::result::Result<T, E>;

/// Errors that can occur while working with ABI types and calldata.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The type signature could not be parsed.
    #[error("malformed signature `{signature}`: {reason}")]
    MalformedSignature { signature: String, reason: String },
    /// The supplied value does not have the shape of its declared type.
    #[error("type mismatch at `{path}`: expected {expected}, got {got}")]
    TypeMismatch { path: String, expected: String, got: String },
    /// A read went past the end of the calldata buffer.
    #[error("tried to decode beyond the end of calldata (needed {needed} bytes at offset {offset}, have {len})")]
    TruncatedCalldata { offset: usize, needed: usize, len: usize },
    /// The calldata does not start with the expected function selector.
    #[error("calldata is missing the function selector: expected {expected}, got 0x{got}")]
    SelectorMismatch { expected: Selector, got: String },
    /// A decoded word is not a valid encoding of its type.
    #[error("invalid {ty} value: {reason}")]
    InvalidValue { ty: String, reason: String },
    /// A pointer would have to point backwards.
    #[error("pointer `{name}` resolves to a negative offset")]
    NegativeOffset { name: String },
    /// A pointer target was never scheduled for emission.
    #[error("block `{name}` has no resolved offset")]
    UnresolvedOffset { name: String },
    /// The value nests deeper than the decoder is willing to go.
    #[error("calldata nests deeper than {0} levels")]
    TooDeep(usize),
}

impl AbiError {
    pub(crate) fn malformed(signature: &str, reason: impl Into<String>) -> Self {
        Self::MalformedSignature { signature: signature.to_string(), reason: reason.into() }
    }

    pub(crate) fn mismatch(
        path: &str,
        expected: impl std::fmt::Display,
        got: impl std::fmt::Display,
    ) -> Self {
        let path = if path.is_empty() { "<root>".to_string() } else { path.to_string() };
        Self::TypeMismatch { path, expected: expected.to_string(), got: got.to_string() }
    }

    pub(crate) fn invalid(ty: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidValue { ty: ty.to_string(), reason: reason.into() }
    }

    /// Returns `true` if this error was caused by reading past the end of the buffer.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedCalldata { .. })
    }
}
