//! Reversible hiding by histogram shifting.
//!
//! The gray image is cut into square blocks. In every block with an empty
//! intensity above its most frequent one (the peak), all intensities between
//! peak and that empty bin (the zero) move up by one. Each peak pixel then
//! carries one bit, it stays at `peak` for 0 and becomes `peak + 1` for 1.
//! Unveiling reads the bits back and moves the intensities down again, which
//! restores the cover exactly.

use image::GrayImage;
use log::{debug, error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{admit, ensure_carriers, Embedded, Steganography, Unveiled};
use crate::artifact::{ArtifactKind, HistogramArtifact, SideArtifact};
use crate::message::{bits_to_bytes, decode_text, text_to_bits};
use crate::options::BlockSearchOptions;
use crate::{Media, Result, SteganoError};

/// upper bound of the random masking seed
const MAX_SEED: u64 = 10_000_000;

/// bits a block size offers over the whole image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCapacity {
    pub block_size: u32,
    pub bits: usize,
}

impl BlockCapacity {
    pub fn chars(&self) -> usize {
        self.bits / 8
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistogramShift {
    blocks: BlockSearchOptions,
}

/// a block of the image, `x`, `y` is its top left corner
#[derive(Debug, Clone, Copy)]
struct Block {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Block {
    fn pixels(self) -> impl Iterator<Item = (u32, u32)> {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }

    fn histogram(self, image: &GrayImage) -> [usize; 256] {
        let mut hist = [0usize; 256];
        for (x, y) in self.pixels() {
            hist[usize::from(image.get_pixel(x, y).0[0])] += 1;
        }
        hist
    }
}

/// non overlapping blocks in scan order, blocks at the right and bottom border may be smaller
fn blocks(width: u32, height: u32, size: u32) -> impl Iterator<Item = Block> {
    (0..height).step_by(size as usize).flat_map(move |y| {
        (0..width).step_by(size as usize).map(move |x| Block {
            x,
            y,
            width: size.min(width - x),
            height: size.min(height - y),
        })
    })
}

/// the lowest most frequent intensity and the lowest empty intensity above it
fn peak_zero(hist: &[usize; 256]) -> Option<(u8, u8)> {
    let mut peak = 0;
    for (value, count) in hist.iter().enumerate() {
        if *count > hist[peak] {
            peak = value;
        }
    }
    let zero = (peak + 1..256).find(|v| hist[*v] == 0)?;

    Some((peak as u8, zero as u8))
}

/// bits all usable blocks of the given size can carry
fn usable_bits(image: &GrayImage, size: u32) -> usize {
    let (width, height) = image.dimensions();
    blocks(width, height, size)
        .filter_map(|block| {
            let hist = block.histogram(image);
            peak_zero(&hist).map(|(peak, _)| hist[usize::from(peak)])
        })
        .sum()
}

/// random bits XORed onto the message, derived from `seed` only
fn mask(seed: u64, len: usize) -> Vec<bool> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn xor(bits: &[bool], mask: &[bool]) -> Vec<bool> {
    bits.iter().zip(mask).map(|(b, m)| b ^ m).collect()
}

impl HistogramShift {
    pub fn new(blocks: BlockSearchOptions) -> Self {
        Self { blocks }
    }

    /// capacity of every candidate block size, largest size first
    pub fn block_capacities(&self, image: &GrayImage) -> Vec<BlockCapacity> {
        let sizes = self.blocks.block_sizes();
        let measure = |size: &u32| BlockCapacity {
            block_size: *size,
            bits: usable_bits(image, *size),
        };

        #[cfg(feature = "parallel")]
        let capacities: Vec<BlockCapacity> = sizes.par_iter().map(measure).collect();
        #[cfg(not(feature = "parallel"))]
        let capacities: Vec<BlockCapacity> = sizes.iter().map(measure).collect();

        for c in &capacities {
            debug!("block size {} offers {} chars", c.block_size, c.chars());
        }
        capacities
    }

    /// the largest block size that offers room for at least one character
    pub fn select_block_size(&self, image: &GrayImage) -> Option<BlockCapacity> {
        self.block_capacities(image)
            .into_iter()
            .find(|c| c.chars() > 0)
    }

    /// hides with a given masking seed instead of a random one
    pub fn embed_with_seed(
        &self,
        cover: &Media,
        message: &str,
        seed: u64,
    ) -> Result<Embedded> {
        let mut image = cover.to_luma8();
        let selected = self.select_block_size(&image).ok_or_else(|| {
            SteganoError::CapacityExceeded {
                capacity: 0,
                requested: message.chars().count(),
            }
        })?;
        admit(selected.chars(), message)?;
        let bits = text_to_bits(message)?;
        ensure_carriers(selected.chars(), message, bits.len(), selected.bits)?;
        info!(
            "Message size is {} chars, achieved for block size {}",
            selected.chars(),
            selected.block_size
        );

        let masked = xor(&bits, &mask(seed, bits.len()));
        let (width, height) = image.dimensions();
        let mut positions = Vec::new();
        let mut next = 0;
        for block in blocks(width, height, selected.block_size) {
            if next >= masked.len() {
                break;
            }
            let hist = block.histogram(&image);
            let Some((peak, zero)) = peak_zero(&hist) else {
                positions.push(None);
                continue;
            };

            for (x, y) in block.pixels() {
                let v = &mut image.get_pixel_mut(x, y).0[0];
                if *v > peak && *v < zero {
                    *v += 1;
                }
            }
            for (x, y) in block.pixels() {
                if next >= masked.len() {
                    break;
                }
                let v = &mut image.get_pixel_mut(x, y).0[0];
                if *v == peak {
                    if masked[next] {
                        *v += 1;
                    }
                    next += 1;
                }
            }
            positions.push(Some((peak, zero)));
        }
        debug!("shifted {} blocks for {} bits", positions.len(), masked.len());

        Ok(Embedded {
            stego: image.into(),
            artifact: Some(SideArtifact::Histogram(HistogramArtifact {
                peak_zero_positions: positions,
                secret_length: masked.len(),
                seed,
                block_size: selected.block_size,
            })),
        })
    }
}

impl Steganography for HistogramShift {
    fn capacity(&self, cover: &Media) -> Result<usize> {
        Ok(self
            .select_block_size(&cover.to_luma8())
            .map(|c| c.chars())
            .unwrap_or(0))
    }

    fn describe_capacity(&self, cover: &Media) -> Result<String> {
        Ok(match self.select_block_size(&cover.to_luma8()) {
            Some(c) => format!(
                "Maximum message size is {} chars, achieved for block size {}.",
                c.chars(),
                c.block_size
            ),
            None => "No block size leaves room for a message.".to_string(),
        })
    }

    fn embed(&self, cover: &Media, message: &str) -> Result<Embedded> {
        let seed = rand::thread_rng().gen_range(0..=MAX_SEED);
        self.embed_with_seed(cover, message, seed)
    }

    fn extract(&self, stego: &Media, artifact: Option<&SideArtifact>) -> Result<Unveiled> {
        let meta = artifact
            .ok_or(SteganoError::MissingArtifact(ArtifactKind::Histogram.name()))?
            .as_histogram()?;
        if meta.block_size == 0 {
            return Err(SteganoError::InvalidArtifact("block size is 0".into()));
        }
        if let Some((peak, zero)) = meta
            .peak_zero_positions
            .iter()
            .flatten()
            .find(|(p, z)| p >= z)
        {
            error!("Histogram metadata holds peak {peak} not below zero {zero}");
            return Err(SteganoError::InvalidArtifact(format!(
                "peak {peak} is not below zero {zero}"
            )));
        }

        let mut image = stego.to_luma8();
        let (width, height) = image.dimensions();
        let pixels = width as usize * height as usize;
        if meta.secret_length > pixels {
            error!(
                "Histogram metadata claims {} bits, the image has {pixels} pixels",
                meta.secret_length
            );
            return Err(SteganoError::InvalidArtifact(format!(
                "secret length {} exceeds {pixels} pixels",
                meta.secret_length
            )));
        }
        let mut masked = Vec::with_capacity(meta.secret_length);
        let positions = meta.peak_zero_positions.iter();
        for (block, position) in blocks(width, height, meta.block_size).zip(positions) {
            let Some((peak, zero)) = *position else {
                continue;
            };
            for (x, y) in block.pixels() {
                if masked.len() >= meta.secret_length {
                    break;
                }
                let v = image.get_pixel(x, y).0[0];
                if v == peak {
                    masked.push(false);
                } else if v == peak + 1 {
                    masked.push(true);
                }
            }
            for (x, y) in block.pixels() {
                let v = &mut image.get_pixel_mut(x, y).0[0];
                if *v > peak && *v <= zero {
                    *v -= 1;
                }
            }
        }
        if masked.len() < meta.secret_length {
            error!(
                "Found {} of {} hidden bits",
                masked.len(),
                meta.secret_length
            );
            return Err(SteganoError::TruncatedPayload);
        }

        let bits = xor(&masked, &mask(meta.seed, masked.len()));
        let message = decode_text(&bits_to_bytes(&bits));
        info!(
            "unveiled {} chars and restored the cover",
            message.chars().count()
        );

        Ok(Unveiled {
            message,
            restored: Some(image.into()),
        })
    }
}
