//! Bit-level buffers shared by the encoder and the reader

/// Append-only MSB-first bit buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 31 && value >> count == 0, "value does not fit");
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Written bits
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes; a trailing partial byte is zero-filled
    pub fn to_codewords(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Pack whole bytes MSB-first, dropping any trailing partial byte
pub fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit as u8))
        .collect()
}

/// Cursor over a bit slice
pub struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    /// Start reading at the first bit
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    /// Bits not yet consumed
    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    /// Unconsumed tail
    pub fn rest(&self) -> &'a [bool] {
        &self.bits[self.idx.min(self.bits.len())..]
    }

    /// Skip `n` bits
    pub fn advance(&mut self, n: usize) {
        self.idx = (self.idx + n).min(self.bits.len());
    }

    /// Read `n` bits as an unsigned value, MSB first
    pub fn read_bits(&mut self, n: usize) -> Option<u32> {
        if self.idx + n > self.bits.len() {
            return None;
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Some(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_pack() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0b0100, 4);
        buf.append_bits(0xAB, 8);
        buf.append_bits(0b1, 1);
        assert_eq!(buf.len(), 13);
        assert_eq!(buf.to_codewords(), vec![0x4A, 0xB8]);
        assert_eq!(bits_to_codewords(buf.bits()), vec![0x4A]);
    }

    #[test]
    fn test_zero_width_append() {
        let mut buf = BitBuffer::with_capacity(8);
        buf.append_bits(0, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_reader() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0b101, 3);
        buf.append_bits(300, 10);
        let mut reader = BitReader::new(buf.bits());
        assert_eq!(reader.read_bits(3), Some(0b101));
        assert_eq!(reader.remaining(), 10);
        assert_eq!(reader.read_bits(10), Some(300));
        assert_eq!(reader.read_bits(1), None);
        assert!(reader.rest().is_empty());
    }
}
