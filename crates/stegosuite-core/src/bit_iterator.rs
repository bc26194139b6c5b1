use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::Read;

/// Iterates over the bits of a byte source, most significant bit first.
///
/// Ends with the last bit of the last complete byte.
pub struct BitIterator<R: Read> {
    reader: BitReader<R, BigEndian>,
}

impl<R: Read> BitIterator<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BitReader::endian(source, BigEndian),
        }
    }
}

impl<R: Read> Iterator for BitIterator<R> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_bit().ok()
    }
}
