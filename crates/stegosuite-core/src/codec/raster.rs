use image::RgbImage;
use log::{debug, info};

use super::{admit, chars_for_bits, ensure_carriers, Embedded, Steganography, Unveiled};
use crate::message::{to_bits, TerminatedReader};
use crate::{Media, Result};

/// where a pixel stores payload bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// the `bits` lowest bits of a channel, most significant first
    Low { channel: usize, bits: u8 },
    /// the difference of bit 5 and bit 4 of the red channel
    RedDifference,
}

impl Slot {
    fn width(self) -> usize {
        match self {
            Slot::Low { bits, .. } => usize::from(bits),
            Slot::RedDifference => 1,
        }
    }

    fn hide(self, pixel: &mut [u8], bits: &[bool]) {
        match self {
            Slot::Low { channel, bits: n } => {
                let mask = (1u8 << n) - 1;
                let value = bits.iter().fold(0u8, |acc, b| (acc << 1) | u8::from(*b));
                pixel[channel] = (pixel[channel] & !mask) | value;
            }
            Slot::RedDifference => {
                if difference(pixel[0]) != bits[0] {
                    pixel[0] ^= 1 << 4;
                }
            }
        }
    }

    fn reveal(self, pixel: &[u8], mut sink: impl FnMut(bool) -> bool) -> bool {
        match self {
            Slot::Low { channel, bits: n } => {
                (0..n).rev().any(|i| sink((pixel[channel] >> i) & 1 == 1))
            }
            Slot::RedDifference => sink(difference(pixel[0])),
        }
    }
}

/// `|bit6 - bit5|` in one based counting, which is bit 5 XOR bit 4 of the byte
fn difference(red: u8) -> bool {
    ((red >> 5) & 1) != ((red >> 4) & 1)
}

const STANDARD: &[Slot] = &[
    Slot::Low { channel: 0, bits: 1 },
    Slot::Low { channel: 1, bits: 1 },
    Slot::Low { channel: 2, bits: 1 },
];

const BLUE_EMPHASIS: &[Slot] = &[
    Slot::Low { channel: 0, bits: 2 },
    Slot::Low { channel: 1, bits: 2 },
    Slot::Low { channel: 2, bits: 4 },
];

const MSB_DIFFERENCE: &[Slot] = &[Slot::RedDifference];

/// Raster order concealer, every pixel offers the same slots.
struct Concealer {
    slots: &'static [Slot],
}

impl Concealer {
    const fn new(slots: &'static [Slot]) -> Self {
        Self { slots }
    }

    fn bits_per_pixel(&self) -> usize {
        self.slots.iter().map(|s| s.width()).sum()
    }

    fn carriers(&self, cover: &Media) -> usize {
        let (width, height) = cover.dimensions();
        width as usize * height as usize * self.bits_per_pixel()
    }

    fn capacity(&self, cover: &Media) -> usize {
        chars_for_bits(self.carriers(cover))
    }

    fn conceal(&self, cover: &Media, message: &str) -> Result<Embedded> {
        let capacity = self.capacity(cover);
        admit(capacity, message)?;
        let bits = to_bits(message)?;
        ensure_carriers(capacity, message, bits.len(), self.carriers(cover))?;

        let mut image: RgbImage = cover.to_rgb8();
        let mut rest = bits.as_slice();
        'pixels: for pixel in image.pixels_mut() {
            for slot in self.slots {
                if rest.is_empty() {
                    break 'pixels;
                }
                let width = slot.width();
                if rest.len() < width {
                    break 'pixels;
                }
                let (head, tail) = rest.split_at(width);
                slot.hide(&mut pixel.0, head);
                rest = tail;
            }
        }
        debug!("concealed {} bits in raster order", bits.len());

        Ok(Embedded {
            stego: image.into(),
            artifact: None,
        })
    }

    fn reveal(&self, stego: &Media) -> Result<Unveiled> {
        let image = stego.to_rgb8();
        let mut reader = TerminatedReader::default();
        'pixels: for pixel in image.pixels() {
            for slot in self.slots {
                if slot.reveal(&pixel.0, |bit| reader.push(bit)) {
                    break 'pixels;
                }
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

/// One bit in the low bit of red, green and blue of every pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLsb;

/// Two bits in red, two in green and four in blue of every pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlueLsb;

/// One bit per pixel, encoded as the difference of two higher red bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsbDifference;

macro_rules! raster_codec {
    ($codec:ty, $slots:expr) => {
        impl Steganography for $codec {
            fn capacity(&self, cover: &Media) -> Result<usize> {
                Ok(Concealer::new($slots).capacity(cover))
            }

            fn embed(&self, cover: &Media, message: &str) -> Result<Embedded> {
                Concealer::new($slots).conceal(cover, message)
            }

            fn extract(
                &self,
                stego: &Media,
                _artifact: Option<&crate::artifact::SideArtifact>,
            ) -> Result<Unveiled> {
                Concealer::new($slots).reveal(stego)
            }
        }
    };
}

raster_codec!(StandardLsb, STANDARD);
raster_codec!(BlueLsb, BLUE_EMPHASIS);
raster_codec!(MsbDifference, MSB_DIFFERENCE);
