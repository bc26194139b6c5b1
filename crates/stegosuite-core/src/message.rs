//! Bit framing of text messages.
//!
//! Every character maps to exactly one byte (Latin-1), bits are ordered most
//! significant first. Terminator framed methods append a single `0x00` byte,
//! length framed methods (histogram shifting) use [`text_to_bits`] and carry
//! the bit count in their side artifact.

use crate::result::Result;
use crate::{BitIterator, SteganoError};

/// end of message marker for terminator framed methods
pub const TERMINATOR: u8 = 0x00;

/// maps each character onto its single byte representation
pub fn encode_text(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| SteganoError::UnsupportedCharacter(c)))
        .collect()
}

/// inverse of [`encode_text`], every byte is a valid character
pub fn decode_text(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// bits of the message without any framing
pub fn text_to_bits(text: &str) -> Result<Vec<bool>> {
    Ok(bytes_to_bits(&encode_text(text)?))
}

pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    BitIterator::new(bytes).collect()
}

/// packs bits into bytes, a trailing partial byte is dropped
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, b| (acc << 1) | u8::from(*b)))
        .collect()
}

/// bits of the message followed by the terminator byte
///
/// A message containing the terminator itself is rejected, it would be cut
/// short on extraction.
pub fn to_bits(text: &str) -> Result<Vec<bool>> {
    let mut bytes = encode_text(text)?;
    if bytes.contains(&TERMINATOR) {
        return Err(SteganoError::UnsupportedCharacter(char::from(TERMINATOR)));
    }
    bytes.push(TERMINATOR);

    Ok(bytes_to_bits(&bytes))
}

/// collects bits into text and stops at the first terminator byte or when the bits run out
pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> String {
    let mut reader = TerminatedReader::default();
    for bit in bits {
        if reader.push(bit) {
            break;
        }
    }

    decode_text(&reader.bytes)
}

/// Incremental byte assembly used by the extract loops.
///
/// Every 8th bit completes a byte, a completed zero byte ends the message.
#[derive(Debug, Default)]
pub struct TerminatedReader {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
    terminated: bool,
}

impl TerminatedReader {
    /// feeds the next bit, returns `true` once the terminator has been read
    pub fn push(&mut self, bit: bool) -> bool {
        if self.terminated {
            return true;
        }
        self.current = (self.current << 1) | u8::from(bit);
        self.filled += 1;
        if self.filled == 8 {
            if self.current == TERMINATOR {
                self.terminated = true;
            } else {
                self.bytes.push(self.current);
            }
            self.current = 0;
            self.filled = 0;
        }

        self.terminated
    }

    /// the raw bytes before the terminator
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        if !self.terminated {
            return Err(SteganoError::TruncatedPayload);
        }
        Ok(self.bytes)
    }

    /// the message before the terminator, fails if the terminator was never read
    pub fn into_text(self) -> Result<String> {
        self.into_bytes().map(|bytes| decode_text(&bytes))
    }
}
