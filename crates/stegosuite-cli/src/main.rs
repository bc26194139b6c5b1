mod cli;
mod commands;

use clap::Parser;
use stegosuite_core::SteganoError;

use crate::cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, SteganoError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let options = args.codec_options();

    match args.command {
        Commands::Hide(args) => args.run(options),
        Commands::Unveil(args) => args.run(options),
        Commands::Capacity(args) => args.run(options),
    }
}
