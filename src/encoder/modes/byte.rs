//! Byte mode codec (Mode 0100) for 8-bit data
use crate::encoder::bitstream::BitBuffer;

/// Append raw bytes to `buf`
pub fn encode(data: &[u8], buf: &mut BitBuffer) {
    for &byte in data {
        buf.append_bits(byte as u32, 8);
    }
}

/// Decode `character_count` bytes
pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
    let needed = character_count * 8;
    if needed > bits.len() {
        return None;
    }
    let bytes = bits[..needed]
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect();
    Some((bytes, needed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_codec() {
        let mut buf = BitBuffer::new();
        encode("HIé".as_bytes(), &mut buf);
        assert_eq!(buf.len(), 32);
        let (decoded, used) = decode(buf.bits(), 4).unwrap();
        assert_eq!(decoded, "HIé".as_bytes());
        assert_eq!(used, 32);
        assert!(decode(buf.bits(), 5).is_none());
    }
}
