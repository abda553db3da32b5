//! Alphanumeric mode codec (Mode 0010)
//! Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bitstream::BitBuffer;

const ALPHANUMERIC_TABLE: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Table value of `byte`, if it is in the alphanumeric set
pub fn value_of(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

/// Payload bits for `count` characters
pub fn data_bits(count: usize) -> usize {
    count / 2 * 11 + count % 2 * 6
}

/// Append alphanumeric characters to `buf`
/// Pairs = 11 bits, single = 6 bits
pub fn encode(text: &[u8], buf: &mut BitBuffer) {
    let value = |b: u8| value_of(b).map_or(0, u32::from);
    for pair in text.chunks(2) {
        match *pair {
            [first, second] => buf.append_bits(value(first) * 45 + value(second), 11),
            [single] => buf.append_bits(value(single), 6),
            _ => {}
        }
    }
}

/// Decode `character_count` characters
pub fn decode(bits: &[bool], character_count: usize) -> Option<(String, usize)> {
    let mut result = String::with_capacity(character_count);
    let mut bit_idx = 0;
    let mut chars_remaining = character_count;

    while chars_remaining > 0 {
        let width = if chars_remaining >= 2 { 11 } else { 6 };
        if bit_idx + width > bits.len() {
            return None;
        }
        let value = bits[bit_idx..bit_idx + width]
            .iter()
            .fold(0usize, |acc, &b| (acc << 1) | b as usize);

        if chars_remaining >= 2 {
            let (first, second) = (value / 45, value % 45);
            if first >= 45 {
                return None;
            }
            result.push(ALPHANUMERIC_TABLE[first] as char);
            result.push(ALPHANUMERIC_TABLE[second] as char);
            chars_remaining -= 2;
        } else {
            if value >= 45 {
                return None;
            }
            result.push(ALPHANUMERIC_TABLE[value] as char);
            chars_remaining -= 1;
        }
        bit_idx += width;
    }

    Some((result, bit_idx))
}
