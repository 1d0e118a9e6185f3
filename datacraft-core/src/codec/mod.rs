use crate::error::{DataCraftError, Result};
use crate::policy::Validation;

pub mod color;

pub use color::{byte_to_color, color_to_byte, decode_chunk, encode_chunk};

/// Number of chunks needed to hold `total` bytes.
pub fn chunk_count(total: u64, chunk_size: usize) -> u64 {
    total.div_ceil(chunk_size as u64)
}

/// The color codec bound to a chunk size and validation mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkCodec {
    pub chunk_size: usize,
    pub validation: Validation,
}

impl ChunkCodec {
    pub fn new(chunk_size: usize, validation: Validation) -> Self {
        Self {
            chunk_size,
            validation,
        }
    }

    pub fn encode(&self, bytes: &[u8]) -> Result<Vec<i8>> {
        if self.validation == Validation::Strict && bytes.len() > self.chunk_size {
            return Err(DataCraftError::ChunkTooLarge {
                len: bytes.len(),
                max: self.chunk_size,
            });
        }
        Ok(encode_chunk(bytes, self.chunk_size))
    }

    /// `id` only labels the error.
    pub fn decode(&self, id: u32, colors: &[i8]) -> Result<Vec<u8>> {
        if self.validation == Validation::Strict && colors.len() != self.chunk_size {
            return Err(DataCraftError::BadRecordLength {
                id,
                len: colors.len(),
                expected: self.chunk_size,
            });
        }
        Ok(decode_chunk(colors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_count_is_ceiling() {
        assert_eq!(chunk_count(0, 16384), 0);
        assert_eq!(chunk_count(1, 16384), 1);
        assert_eq!(chunk_count(16384, 16384), 1);
        assert_eq!(chunk_count(16385, 16384), 2);
        assert_eq!(chunk_count(20000, 16384), 2);
    }

    #[test]
    fn lenient_truncates_and_passes_through() {
        let codec = ChunkCodec::new(4, Validation::Lenient);
        assert_eq!(codec.encode(&[9; 6]).unwrap(), vec![9; 4]);
        assert_eq!(codec.decode(7, &[-1, 0]).unwrap(), vec![255, 0]);
    }

    #[test]
    fn strict_rejects_bad_sizes() {
        let codec = ChunkCodec::new(4, Validation::Strict);
        assert!(matches!(
            codec.encode(&[0; 5]),
            Err(DataCraftError::ChunkTooLarge { len: 5, max: 4 })
        ));
        assert!(matches!(
            codec.decode(42, &[0; 3]),
            Err(DataCraftError::BadRecordLength {
                id: 42,
                len: 3,
                expected: 4
            })
        ));
        assert_eq!(codec.encode(&[1, 2]).unwrap(), vec![1, 2, 0, 0]);
    }
}
