#[macro_use]
extern crate tracing;

use calldata_cli::{Config, handler, utils};
use calldata_codec::{Event, Method, TypeNode};
use clap::Parser;
use eyre::Result;

mod args;
mod cmd;

use args::{Calldata as CalldataArgs, CalldataSubcommand};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();
    let args = CalldataArgs::parse();
    run(args)
}

fn run(args: CalldataArgs) -> Result<()> {
    let config = Config::load()?;
    debug!(?config, "loaded config");
    match args.cmd {
        CalldataSubcommand::Sig { sig, event } => {
            if event {
                println!("{}", Event::parse(&sig)?.topic());
            } else {
                println!("{}", Method::parse(&sig)?.selector());
            }
        }
        CalldataSubcommand::Parse { ty } => {
            let ty = TypeNode::parse(&ty)?;
            println!("canonical: {}", ty.canonical());
            println!("detailed:  {}", ty.detailed());
            println!("dynamic:   {}", ty.is_dynamic());
        }
        CalldataSubcommand::Encode(cmd) => cmd.run(&config)?,
        CalldataSubcommand::Decode(cmd) => cmd.run(&config)?,
        CalldataSubcommand::DecodeCalldata(cmd) => cmd.run(&config)?,
        CalldataSubcommand::DecodeLog(cmd) => cmd.run(&config)?,
        CalldataSubcommand::Methods(cmd) => cmd.run(&config)?,
    }
    Ok(())
}
