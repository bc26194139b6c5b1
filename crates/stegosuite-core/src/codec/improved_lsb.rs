use log::{debug, error, info};
use stegosuite_cipher::{open, seal, SecretKey, SEAL_OVERHEAD};

use super::{admit, chars_for_bits, ensure_carriers, Embedded, Steganography, Unveiled};
use crate::artifact::{ArtifactKind, KeyArtifact, SideArtifact};
use crate::message::{bytes_to_bits, decode_text, encode_text, TerminatedReader, TERMINATOR};
use crate::position::{KeyRouter, Raster};
use crate::{Media, Result, SteganoError};

/// Encrypted message, one bit per pixel in raster order.
///
/// The channel of each bit is picked by the key router, the red channel is
/// only read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedLsb;

impl ImprovedLsb {
    /// characters whose sealed token still fits into `pixels` carriers
    pub fn sealed_capacity(pixels: usize) -> usize {
        let token_bytes = (pixels / 8).saturating_sub(1);
        (3 * (token_bytes / 4)).saturating_sub(SEAL_OVERHEAD)
    }

    /// hides with a given key instead of a fresh one
    pub fn embed_with_key(
        &self,
        cover: &Media,
        message: &str,
        key: &SecretKey,
    ) -> Result<Embedded> {
        admit(self.capacity(cover)?, message)?;
        let plain = encode_text(message)?;

        let mut token = seal(key, &plain)
            .map_err(SteganoError::EncryptionError)?
            .into_bytes();
        token.push(TERMINATOR);
        let bits = bytes_to_bits(&token);

        let (width, height) = cover.dimensions();
        let pixels = width as usize * height as usize;
        ensure_carriers(Self::sealed_capacity(pixels), message, bits.len(), pixels)?;

        let key_text = key.to_base64();
        let router = KeyRouter::new(key_text.as_bytes());
        let mut image = cover.to_rgb8();
        for (i, ((x, y), bit)) in Raster::new(width, height).zip(bits.iter()).enumerate() {
            let pixel = image.get_pixel_mut(x, y);
            let channel = router.route(i, pixel.0[0]).channel();
            pixel.0[channel] = (pixel.0[channel] & !1) | u8::from(*bit);
        }
        debug!("hid a {} byte token", token.len() - 1);

        Ok(Embedded {
            stego: image.into(),
            artifact: Some(SideArtifact::Key(KeyArtifact {
                secret_key: key_text,
            })),
        })
    }
}

impl Steganography for ImprovedLsb {
    fn capacity(&self, cover: &Media) -> Result<usize> {
        let (width, height) = cover.dimensions();
        Ok(chars_for_bits(width as usize * height as usize * 3))
    }

    fn describe_capacity(&self, cover: &Media) -> Result<String> {
        let (width, height) = cover.dimensions();
        Ok(format!(
            "Maximum message size is less than {} chars (encryption is not taken into account, the actual capacity is {} chars).",
            self.capacity(cover)?,
            Self::sealed_capacity(width as usize * height as usize)
        ))
    }

    fn embed(&self, cover: &Media, message: &str) -> Result<Embedded> {
        self.embed_with_key(cover, message, &SecretKey::generate())
    }

    fn extract(&self, stego: &Media, artifact: Option<&SideArtifact>) -> Result<Unveiled> {
        let artifact = artifact
            .ok_or(SteganoError::MissingArtifact(ArtifactKind::Key.name()))?
            .as_key()?;
        let key = SecretKey::from_base64(&artifact.secret_key).map_err(|e| {
            error!("Key is unusable: {e}");
            SteganoError::DecryptionFailed(e)
        })?;
        let router = KeyRouter::new(artifact.secret_key.as_bytes());

        let image = stego.to_rgb8();
        let (width, height) = image.dimensions();
        let mut reader = TerminatedReader::default();
        for (i, (x, y)) in Raster::new(width, height).enumerate() {
            let pixel = image.get_pixel(x, y);
            let channel = router.route(i, pixel.0[0]).channel();
            if reader.push(pixel.0[channel] & 1 == 1) {
                break;
            }
        }
        let token = reader.into_bytes()?;

        let plain = open(&key, &token).map_err(|e| {
            error!("Error decrypting the hidden token: {e}");
            SteganoError::DecryptionFailed(e)
        })?;
        let message = decode_text(&plain);
        info!("unveiled {} chars", message.chars().count());

        Ok(Unveiled {
            message,
            restored: None,
        })
    }
}
