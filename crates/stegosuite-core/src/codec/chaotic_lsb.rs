use log::{debug, info};

use super::{admit, chars_for_bits, Embedded, Steganography, Unveiled};
use crate::artifact::SideArtifact;
use crate::message::{to_bits, TerminatedReader};
use crate::position::{HenonParams, HenonPoints};
use crate::{Media, Result, SteganoError};

/// One bit in the blue low bit of every pixel the Hénon map visits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaoticLsb {
    params: HenonParams,
}

impl ChaoticLsb {
    pub fn new(params: HenonParams) -> Self {
        Self { params }
    }

    fn points(&self, cover: &Media) -> HenonPoints {
        let (width, height) = cover.dimensions();
        HenonPoints::new(width, height, self.params)
    }
}

impl Steganography for ChaoticLsb {
    fn capacity(&self, cover: &Media) -> Result<usize> {
        Ok(chars_for_bits(self.points(cover).count()))
    }

    fn embed(&self, cover: &Media, message: &str) -> Result<Embedded> {
        let capacity = self.capacity(cover)?;
        admit(capacity, message)?;
        let bits = to_bits(message)?;

        let points: Vec<(u32, u32)> = self.points(cover).take(bits.len()).collect();
        if points.len() < bits.len() {
            return Err(SteganoError::CapacityExceeded {
                capacity,
                requested: message.chars().count(),
            });
        }
        debug!("hiding {} bits along the chaotic orbit", bits.len());

        let mut image = cover.to_rgb8();
        for ((x, y), bit) in points.into_iter().zip(bits) {
            let blue = &mut image.get_pixel_mut(x, y).0[2];
            *blue = (*blue & !1) | u8::from(bit);
        }

        Ok(Embedded {
            stego: image.into(),
            artifact: None,
        })
    }

    fn extract(&self, stego: &Media, _artifact: Option<&SideArtifact>) -> Result<Unveiled> {
        let image = stego.to_rgb8();
        let mut reader = TerminatedReader::default();
        for (x, y) in self.points(stego) {
            if reader.push(image.get_pixel(x, y).0[2] & 1 == 1) {
                break;
            }
        }
        let message = reader.into_text()?;
        info!("unveiled {} chars", message.chars().count());

        Ok(Unveiled {
            message,
            restored: None,
        })
    }
}
