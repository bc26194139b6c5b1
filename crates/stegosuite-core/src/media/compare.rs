use log::debug;

use super::Media;
use crate::{Result, SteganoError};

/// How much two images of the same size differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageDifference {
    /// count of differing bits over all samples
    pub differing_bits: u64,
    /// count of pixels with at least one differing channel
    pub differing_pixels: u64,
}

/// Compares two images sample by sample, both are brought to the color model of `original`.
pub fn compare_images(original: &Media, other: &Media) -> Result<ImageDifference> {
    if original.dimensions() != other.dimensions() {
        return Err(SteganoError::DimensionMismatch {
            expected: original.dimensions(),
            found: other.dimensions(),
        });
    }

    let converted;
    let other = if original.color_model() == other.color_model() {
        other
    } else {
        converted = match original {
            Media::Rgb(_) => Media::Rgb(other.to_rgb8()),
            Media::Gray(_) => Media::Gray(other.to_luma8()),
        };
        &converted
    };

    let channels = match original {
        Media::Rgb(_) => 3,
        Media::Gray(_) => 1,
    };

    let mut diff = ImageDifference::default();
    for (a, b) in original
        .as_samples()
        .chunks(channels)
        .zip(other.as_samples().chunks(channels))
    {
        let bits: u32 = a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum();
        if bits > 0 {
            diff.differing_pixels += 1;
            diff.differing_bits += u64::from(bits);
        }
    }
    debug!(
        "images differ in {} bits over {} pixels",
        diff.differing_bits, diff.differing_pixels
    );

    Ok(diff)
}
