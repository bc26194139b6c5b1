use std::path::PathBuf;

use clap::Args;
use stegosuite_core::CodecOptions;

use crate::cli::MethodArg;
use crate::CliResult;

/// Shows how many characters an image can hide
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// The hiding method
    #[arg(long, value_enum, default_value_t)]
    pub method: MethodArg,

    /// Carrier image
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let capacity =
            stegosuite_core::commands::capacity(self.method.into(), &self.media, options)?;
        println!("{}", capacity.description);

        Ok(())
    }
}
