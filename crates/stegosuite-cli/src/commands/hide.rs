use std::path::PathBuf;

use clap::Args;
use log::info;
use stegosuite_core::CodecOptions;

use crate::cli::MethodArg;
use crate::CliResult;

/// Hides a text message in an image, the result is always a PNG image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// The hiding method
    #[arg(long, value_enum, default_value_t)]
    pub method: MethodArg,

    /// Carrier image, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "message_file"
    )]
    pub message: Option<String>,

    /// A text file whose content will be hidden
    #[arg(long, value_name = "message file", conflicts_with = "message")]
    pub message_file: Option<PathBuf>,

    /// Where the side artifact of the method is stored, defaults to a file next to the output image
    #[arg(short, long, value_name = "artifact file")]
    pub artifact: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let hidden = stegosuite_core::commands::hide(
            self.method.into(),
            &self.media,
            &self.write_to_file,
            self.message,
            self.message_file,
            self.artifact,
            options,
        )?;

        info!(
            "{} bits in {} pixels differ from the carrier",
            hidden.difference.differing_bits, hidden.difference.differing_pixels
        );
        if let Some(artifact) = hidden.artifact {
            println!("Keep {} to unveil the message", artifact.display());
        }

        Ok(())
    }
}
