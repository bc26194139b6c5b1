use std::path::{Path, PathBuf};

use log::info;

use crate::{CodecOptions, Media, Method, Persist, SideArtifact, SteganoError, Steganography};

/// file name of the restored cover when no other path is given
pub const RESTORED_FILE_NAME: &str = "rdh_recovered.png";

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

/// What unveiling found.
#[derive(Debug)]
pub struct Revealed {
    pub message: String,
    /// where the restored cover was written, for reversible methods
    pub restored: Option<PathBuf>,
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    method: Method,
    secret_image: Option<PathBuf>,
    artifact: Option<PathBuf>,
    restored_output: Option<PathBuf>,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options, they must match the ones used for hiding
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// The side artifact written by hiding, defaults to the file next to the secret image
    pub fn use_artifact(mut self, artifact: Option<PathBuf>) -> Self {
        self.artifact = artifact;
        self
    }

    /// Where the restored cover goes, defaults to `rdh_recovered.png` next to the secret image
    pub fn use_restored_output(mut self, restored_output: Option<PathBuf>) -> Self {
        self.restored_output = restored_output;
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<Revealed, SteganoError> {
        let Some(secret_image) = self.secret_image else {
            return Err(SteganoError::CarrierNotSet);
        };

        let media = Media::from_file(&secret_image, self.method.color_model())?;
        let artifact = match self.method.artifact_kind() {
            Some(kind) => {
                let path = self
                    .artifact
                    .unwrap_or_else(|| kind.default_path(&secret_image));
                Some(SideArtifact::load(kind, &path)?)
            }
            None => None,
        };

        let unveiled = self
            .method
            .strategy(&self.options)
            .extract(&media, artifact.as_ref())?;

        let restored = match unveiled.restored {
            Some(cover) => {
                let path = self
                    .restored_output
                    .unwrap_or_else(|| secret_image.with_file_name(RESTORED_FILE_NAME));
                cover.save_as(&path)?;
                info!("Restored cover saved to {path:?}");
                Some(path)
            }
            None => None,
        };

        Ok(Revealed {
            message: unveiled.message,
            restored,
        })
    }
}
