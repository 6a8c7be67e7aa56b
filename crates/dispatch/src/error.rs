use alloy_primitives::Selector;
use calldata_codec::AbiError;

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

/// Errors returned by the [`SelectorRegistry`](crate::SelectorRegistry).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no functions registered for selector {0}")]
    SelectorNotFound(Selector),
    #[error("no function registered with selector {selector} and owner `{owner}`")]
    OwnerNotFound { selector: Selector, owner: String },
    #[error("malformed calldata: expected a 4-byte function selector, got {len} bytes")]
    MalformedCalldata { len: usize },
    #[error("failed to rename overloaded method `{name}` to `{renamed}`: a method with this name already exists")]
    OverloadRenameConflict { name: String, renamed: String },
    #[error(transparent)]
    Codec(#[from] AbiError),
}
