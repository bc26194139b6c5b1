use crate::message::bytes_to_bits;

/// Repeating key stream, the bits of the key text indexed modulo their count.
///
/// At every raster position the key bit is XORed with the low bit of the red
/// channel, the result selects the channel carrying the payload bit.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    key_bits: Vec<bool>,
}

/// payload channel choice of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Green,
    Blue,
}

impl Route {
    pub fn channel(self) -> usize {
        match self {
            Route::Green => 1,
            Route::Blue => 2,
        }
    }
}

impl KeyRouter {
    pub fn new(key: &[u8]) -> Self {
        Self {
            key_bits: bytes_to_bits(key),
        }
    }

    /// key bit at the `index`-th payload position
    pub fn key_bit(&self, index: usize) -> bool {
        self.key_bits[index % self.key_bits.len()]
    }

    /// `reference` is the red channel value of the carrier pixel
    pub fn route(&self, index: usize, reference: u8) -> Route {
        if self.key_bit(index) ^ (reference & 1 == 1) {
            Route::Blue
        } else {
            Route::Green
        }
    }
}
