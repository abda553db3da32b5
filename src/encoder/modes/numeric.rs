//! Numeric mode codec (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bitstream::BitBuffer;

fn group_bits(group_size: usize) -> usize {
    match group_size {
        3 => 10,
        2 => 7,
        _ => 4,
    }
}

/// Payload bits for `count` digits
pub fn data_bits(count: usize) -> usize {
    count / 3 * 10 + [0, 4, 7][count % 3]
}

/// Append ASCII digits to `buf`
pub fn encode(digits: &[u8], buf: &mut BitBuffer) {
    for group in digits.chunks(3) {
        let value = group
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
        buf.append_bits(value, group_bits(group.len()));
    }
}

/// Decode `character_count` digits
/// Returns (decoded_string, bits_consumed)
pub fn decode(bits: &[bool], character_count: usize) -> Option<(String, usize)> {
    let mut result = String::with_capacity(character_count);
    let mut bit_idx = 0;
    let mut chars_remaining = character_count;

    while chars_remaining > 0 {
        let group_size = chars_remaining.min(3);
        let bits_needed = group_bits(group_size);
        if bit_idx + bits_needed > bits.len() {
            return None;
        }

        let value = bits[bit_idx..bit_idx + bits_needed]
            .iter()
            .fold(0u16, |acc, &b| (acc << 1) | b as u16);
        // 10 bits can hold up to 1023; anything past 999 is not a digit group.
        if value >= 10u16.pow(group_size as u32) {
            return None;
        }

        result.push_str(&format!("{:0width$}", value, width = group_size));
        bit_idx += bits_needed;
        chars_remaining -= group_size;
    }

    Some((result, bit_idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encode() {
        // "01234567" -> 012 345 67 -> 0000001100 0101011001 1000011
        let mut buf = BitBuffer::new();
        encode(b"01234567", &mut buf);
        assert_eq!(buf.len(), data_bits(8));
        assert_eq!(buf.len(), 27);
        let (decoded, used) = decode(buf.bits(), 8).unwrap();
        assert_eq!(decoded, "01234567");
        assert_eq!(used, 27);
    }

    #[test]
    fn test_numeric_decode() {
        // 3 digits in 10 bits - binary 1111111001 = 1017 is out of range
        let bits = vec![true, true, true, true, true, true, true, false, false, true];
        assert!(decode(&bits, 3).is_none());

        // 0b0001111011 = 123
        let bits = vec![false, false, false, true, true, true, true, false, true, true];
        assert_eq!(decode(&bits, 3), Some(("123".to_string(), 10)));
    }

    #[test]
    fn test_data_bits() {
        assert_eq!(data_bits(0), 0);
        assert_eq!(data_bits(1), 4);
        assert_eq!(data_bits(2), 7);
        assert_eq!(data_bits(13), 44);
    }
}
