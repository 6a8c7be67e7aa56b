//! Subcommands with more than a couple of arguments.
//!
//! Each one exposes an `*Args` struct that is parsed by clap and executed with `run`.

pub mod decode;
pub mod dispatch;
pub mod encode;
