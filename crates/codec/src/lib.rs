//! # calldata-codec
//!
//! Encoding and decoding of ABI calldata through an intermediate block tree.
//!
//! ```
//! use calldata_codec::{DecodingRules, EncodingRules, Method, Value};
//!
//! let method = Method::parse("f(string,string)")?;
//! let args = [Value::from("Hello"), Value::from("Hello")];
//! let plain = method.encode(&args, EncodingRules::default())?;
//! let optimized = method.encode(&args, EncodingRules::default().optimized())?;
//! assert!(optimized.to_bytes().len() < plain.to_bytes().len());
//! assert_eq!(method.decode(&optimized.to_bytes(), DecodingRules::default())?, args);
//! # Ok::<_, calldata_codec::AbiError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

pub mod block;
pub mod constants;
pub mod decoder;
pub mod ty;

mod calldata;
mod coerce;
mod error;
mod event;
mod fmt;
mod method;
mod rules;
mod value;

pub use calldata::{Calldata, encode, encode_with_selector};
pub use decoder::{RawCalldata, decode};
pub use error::{AbiError, Result};
pub use event::{Event, EventInput};
pub use method::Method;
pub use rules::{DecodingRules, EncodingRules};
pub use ty::{ArrayLen, Component, Elementary, TypeKind, TypeNode};
pub use value::Value;
