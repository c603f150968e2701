use crate::constants::audio::SAMPLES_PER_BLOCK;

/// One read's worth of decoded samples
pub type SampleBlock = heapless::Vec<i16, SAMPLES_PER_BLOCK>;

/// Decodes little-endian signed 16-bit samples from a raw block
///
/// A trailing odd byte is dropped, and so is anything past one block.
pub fn decode_block(bytes: &[u8]) -> SampleBlock {
    // `take` bounds the count to the block capacity
    bytes
        .chunks_exact(2)
        .take(SAMPLES_PER_BLOCK)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod samples_tests {
    use super::*;
    use crate::constants::audio::BLOCK_BYTES;

    #[test]
    fn test_little_endian_decode() {
        let block = decode_block(&[0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80, 0xFF, 0xFF]);
        assert_eq!(&block[..], &[0, 32767, -32768, -1]);
    }

    #[test]
    fn test_odd_trailing_byte_dropped() {
        let block = decode_block(&[0x01, 0x00, 0x02]);
        assert_eq!(&block[..], &[1]);
    }

    #[test]
    fn test_oversized_input_fills_one_block() {
        let bytes = [0x11u8; BLOCK_BYTES + 6];
        let block = decode_block(&bytes);
        assert_eq!(block.len(), SAMPLES_PER_BLOCK);
        assert!(block.iter().all(|s| *s == 0x1111));
    }
}
