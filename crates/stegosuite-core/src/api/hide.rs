use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::{
    compare_images, CodecOptions, ImageDifference, Media, Method, SteganoError, Steganography,
};

pub fn prepare() -> HideApi {
    HideApi::default()
}

/// What hiding left on disk.
#[derive(Debug)]
pub struct Hidden {
    pub output: PathBuf,
    /// the side artifact file, for methods that need one
    pub artifact: Option<PathBuf>,
    /// how much the stego image differs from the cover
    pub difference: ImageDifference,
}

#[derive(Default, Debug)]
pub struct HideApi {
    method: Method,
    message: Option<String>,
    message_file: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    artifact: Option<PathBuf>,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// Read the message from a text file, only used when no message is set
    pub fn use_message_file(mut self, message_file: Option<PathBuf>) -> Self {
        self.message_file = message_file;
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// The stego image is always written as PNG
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Where the side artifact goes, defaults to a file next to the output
    pub fn use_artifact(mut self, artifact: Option<PathBuf>) -> Self {
        self.artifact = artifact;
        self
    }

    pub fn execute(self) -> Result<Hidden, SteganoError> {
        let message = match (self.message, &self.message_file) {
            (Some(message), _) => message,
            (None, Some(file)) => fs::read_to_string(file).map_err(|source| {
                error!("Error reading message file {file:?}: {source}");
                SteganoError::ReadError { source }
            })?,
            (None, None) => return Err(SteganoError::MissingMessage),
        };
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };

        let cover = Media::from_file(&image, self.method.color_model())?;
        let embedded = self.method.strategy(&self.options).embed(&cover, &message)?;
        let difference = compare_images(&cover, &embedded.stego)?;

        let image_data = embedded.stego.encode_png()?;
        let artifact = match embedded.artifact {
            Some(artifact) => {
                let path = self
                    .artifact
                    .unwrap_or_else(|| artifact.kind().default_path(&output));
                artifact.save_as(&path)?;
                Some(path)
            }
            None => None,
        };

        if let Err(source) = fs::write(&output, image_data) {
            error!("Error writing stego image {output:?}: {source}");
            if let Some(path) = &artifact {
                if let Err(e) = fs::remove_file(path) {
                    error!("Error removing side artifact {path:?}: {e}");
                }
            }
            return Err(SteganoError::WriteError { source });
        }
        info!(
            "Hid {} chars with {} in {output:?}, {} bits differ",
            message.chars().count(),
            self.method,
            difference.differing_bits
        );

        Ok(Hidden {
            output,
            artifact,
            difference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::noisy_rgb;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        noisy_rgb(48, 48, 1).save(&carrier).unwrap();

        let hidden = crate::api::hide::prepare()
            .with_method(Method::EdgeLsb)
            .with_message("Hello, World!")
            .with_image(&carrier)
            .with_output(temp_dir.path().join("image-with-secret.png"))
            .execute()
            .expect("Failed to hide message in image");

        assert_eq!(
            hidden.artifact,
            Some(temp_dir.path().join("image-with-secret.edges.txt"))
        );
        assert!(hidden.output.exists());
        assert!(hidden.difference.differing_bits > 0);
    }

    #[test]
    fn should_remove_artifact_when_image_cannot_be_written() {
        let temp_dir = tempdir().unwrap();
        let carrier = temp_dir.path().join("carrier.png");
        let key_file = temp_dir.path().join("secret.key.json");
        noisy_rgb(48, 48, 3).save(&carrier).unwrap();

        // a directory cannot be written as a file
        let result = prepare()
            .with_method(Method::ImprovedLsb)
            .with_message("lost")
            .with_image(&carrier)
            .with_output(temp_dir.path())
            .use_artifact(Some(key_file.clone()))
            .execute();

        assert!(matches!(result, Err(SteganoError::WriteError { .. })));
        assert!(!key_file.exists());
    }

    #[test]
    fn should_read_message_file() {
        let temp_dir = tempdir().unwrap();
        let carrier = temp_dir.path().join("carrier.png");
        let message = temp_dir.path().join("message.txt");
        noisy_rgb(16, 16, 2).save(&carrier).unwrap();
        fs::write(&message, "from a file").unwrap();

        let hidden = prepare()
            .use_message_file(Some(message))
            .with_image(&carrier)
            .with_output(temp_dir.path().join("out.png"))
            .execute()
            .unwrap();
        assert!(hidden.artifact.is_none());
    }

    #[test]
    fn should_require_message_image_and_output() {
        assert!(matches!(
            prepare().with_image("a.png").with_output("b.png").execute(),
            Err(SteganoError::MissingMessage)
        ));
        assert!(matches!(
            prepare().with_message("x").with_output("b.png").execute(),
            Err(SteganoError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_message("x").with_image("a.png").execute(),
            Err(SteganoError::TargetNotSet)
        ));
    }
}
