use std::path::{Path, PathBuf};

use crate::{CodecOptions, Media, Method, SteganoError, Steganography};

pub fn prepare() -> CapacityApi {
    CapacityApi::default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capacity {
    pub chars: usize,
    /// the capacity as a sentence for humans
    pub description: String,
}

#[derive(Default, Debug)]
pub struct CapacityApi {
    method: Method,
    image: Option<PathBuf>,
    options: CodecOptions,
}

impl CapacityApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<Capacity, SteganoError> {
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };
        let cover = Media::from_file(&image, self.method.color_model())?;
        let strategy = self.method.strategy(&self.options);

        Ok(Capacity {
            chars: strategy.capacity(&cover)?,
            description: strategy.describe_capacity(&cover)?,
        })
    }
}
