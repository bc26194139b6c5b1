use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use log::error;

use crate::error::SteganoError;
use crate::result::Result;

use super::Persist;

/// The pixel layout a method works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// three 8 bit channels
    Rgb,
    /// a single 8 bit intensity
    Gray,
}

/// a raster container for steganography
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Rgb(RgbImage),
    Gray(GrayImage),
}

impl From<RgbImage> for Media {
    fn from(img: RgbImage) -> Self {
        Self::Rgb(img)
    }
}

impl From<GrayImage> for Media {
    fn from(img: GrayImage) -> Self {
        Self::Gray(img)
    }
}

impl Media {
    /// decodes an image file into the given color model
    pub fn from_file(path: &Path, model: ColorModel) -> Result<Self> {
        let img = image::open(path).map_err(|source| {
            error!("Error opening image {path:?}: {source}");
            SteganoError::ImageDecodeFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(Self::from_dynamic(img, model))
    }

    pub fn from_dynamic(img: DynamicImage, model: ColorModel) -> Self {
        match model {
            ColorModel::Rgb => Self::Rgb(img.to_rgb8()),
            ColorModel::Gray => Self::Gray(img.to_luma8()),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Media::Rgb(i) => i.dimensions(),
            Media::Gray(i) => i.dimensions(),
        }
    }

    pub fn color_model(&self) -> ColorModel {
        match self {
            Media::Rgb(_) => ColorModel::Rgb,
            Media::Gray(_) => ColorModel::Gray,
        }
    }

    /// an owned rgb working copy, gray images are expanded
    pub fn to_rgb8(&self) -> RgbImage {
        match self {
            Media::Rgb(i) => i.clone(),
            Media::Gray(i) => DynamicImage::ImageLuma8(i.clone()).to_rgb8(),
        }
    }

    /// an owned gray working copy, rgb images are reduced to their luma
    pub fn to_luma8(&self) -> GrayImage {
        match self {
            Media::Rgb(i) => DynamicImage::ImageRgb8(i.clone()).to_luma8(),
            Media::Gray(i) => i.clone(),
        }
    }

    /// the raw samples, row major and channel interleaved
    pub fn as_samples(&self) -> &[u8] {
        match self {
            Media::Rgb(i) => i.as_raw(),
            Media::Gray(i) => i.as_raw(),
        }
    }

    /// lossless PNG encoding, other formats would destroy the hidden bits
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        let written = match self {
            Media::Rgb(i) => i.write_to(&mut buf, ImageFormat::Png),
            Media::Gray(i) => i.write_to(&mut buf, ImageFormat::Png),
        };
        written.map_err(|e| {
            error!("Error encoding image: {e}");
            SteganoError::ImageEncodingError(e)
        })?;

        Ok(buf.into_inner())
    }
}

impl Persist for Media {
    fn save_as(&self, file: &Path) -> Result<()> {
        let data = self.encode_png()?;
        let mut f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            SteganoError::WriteError { source: e }
        })?;

        f.write_all(&data)
            .map_err(|source| SteganoError::WriteError { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::gradient_rgb;
    use tempfile::TempDir;

    #[test]
    fn should_round_trip_through_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("media.png");
        let media = Media::from(gradient_rgb(9, 4));

        media.save_as(&path).unwrap();
        let loaded = Media::from_file(&path, ColorModel::Rgb).unwrap();

        assert_eq!(loaded, media);
    }

    #[test]
    fn should_convert_between_color_models() {
        let gray = Media::from(GrayImage::from_pixel(3, 2, image::Luma([77])));
        let rgb = gray.to_rgb8();

        assert_eq!(rgb.get_pixel(1, 1).0, [77, 77, 77]);
        assert_eq!(Media::from(rgb).to_luma8().get_pixel(2, 0).0, [77]);
        assert_eq!(gray.color_model(), ColorModel::Gray);
        assert_eq!(gray.dimensions(), (3, 2));
    }

    #[test]
    fn should_fail_on_missing_image() {
        let result = Media::from_file(Path::new("no_such_image.png"), ColorModel::Rgb);
        assert!(matches!(
            result,
            Err(SteganoError::ImageDecodeFailed { .. })
        ));
    }
}
