//! # calldata-dispatch
//!
//! A registry of methods and events keyed by selector and topic, used to decode calldata and
//! logs whose schema is not known up front.

#[macro_use]
extern crate tracing;

mod error;
mod log;
mod overload;
mod registry;

pub use error::{DispatchError, Result};
pub use log::{DecodedLog, MaybeDecodedLog};
pub use overload::rename_overloaded_methods;
pub use registry::{DecodedCalldata, MethodEntry, SelectorRegistry};
