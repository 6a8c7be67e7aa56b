use crate::cmd::{
    decode::DecodeArgs,
    dispatch::{DecodeCalldataArgs, DecodeLogArgs, MethodsArgs},
    encode::EncodeArgs,
};
use clap::{Parser, Subcommand};

/// Encode and decode ABI calldata.
#[derive(Parser)]
#[command(name = "calldata", version, next_display_order = None)]
pub struct Calldata {
    #[command(subcommand)]
    pub cmd: CalldataSubcommand,
}

#[derive(Subcommand)]
pub enum CalldataSubcommand {
    /// Get the selector of a function, or the topic of an event.
    #[command(visible_alias = "si")]
    Sig {
        /// The function or event signature, e.g. `transfer(address,uint256)`.
        sig: String,

        /// Treat the signature as an event and print its topic hash.
        #[arg(long, short)]
        event: bool,
    },

    /// ABI-encode a function call.
    #[command(visible_alias = "e")]
    Encode(EncodeArgs),

    /// ABI-decode calldata or return data of a known function.
    #[command(visible_alias = "d")]
    Decode(DecodeArgs),

    /// Decode calldata against the functions of one or more JSON ABIs.
    #[command(visible_alias = "dc")]
    DecodeCalldata(DecodeCalldataArgs),

    /// Decode an event log against the events of one or more JSON ABIs.
    #[command(visible_alias = "dl")]
    DecodeLog(DecodeLogArgs),

    /// List the functions of one or more JSON ABIs, with overloads given unique names.
    Methods(MethodsArgs),

    /// Print the canonical form of a type.
    #[command(visible_alias = "p")]
    Parse {
        /// The type, e.g. `(uint256 amount, string[] memos)`.
        ty: String,
    },
}
