use std::path::PathBuf;

use clap::Args;
use stegosuite_core::CodecOptions;

use crate::cli::MethodArg;
use crate::CliResult;

/// Unveils a text message from an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// The method the message was hidden with
    #[arg(long, value_enum, default_value_t)]
    pub method: MethodArg,

    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,

    /// The side artifact written when hiding, defaults to the file next to the source image
    #[arg(short, long, value_name = "artifact file")]
    pub artifact: Option<PathBuf>,

    /// Where the restored carrier of the rdh method is stored
    #[arg(long = "restored-out", value_name = "restored image file")]
    pub restored_output: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let revealed = stegosuite_core::commands::unveil(
            self.method.into(),
            &self.media,
            self.artifact,
            self.restored_output,
            options,
        )?;

        println!("{}", revealed.message);
        if let Some(restored) = revealed.restored {
            println!("Reversed image saved to: {}", restored.display());
        }

        Ok(())
    }
}
