//! # calldata-cli
//!
//! Shared pieces of the `calldata` binary: error reporting, logging, configuration and argument
//! helpers.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod handler;
pub mod utils;

pub use config::{Config, ExtractConfigError};
