//! Format and version information
//!
//! Format information is 15 bits: 5 data bits (EC level indicator and mask)
//! plus a BCH(15,5) remainder, XORed with 0x5412 so it is never all light.
//! Versions 7+ also carry 18 bits of version information: the version number
//! plus a BCH(18,6) remainder.
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u16 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

/// Remainder of `data · x^degree` divided by `generator` over GF(2)
pub fn bch_remainder(data: u32, generator: u32, degree: u32) -> u32 {
    let mut rem = data << degree;
    let gen_len = 32 - generator.leading_zeros();
    while rem != 0 && 32 - rem.leading_zeros() >= gen_len {
        let shift = 32 - rem.leading_zeros() - gen_len;
        rem ^= generator << shift;
    }
    rem
}

/// Masked 15-bit format word for (level, mask)
pub fn format_info_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = u32::from(ec_level.format_bits()) << 3 | u32::from(mask.bits());
    let word = data << 10 | bch_remainder(data, FORMAT_GENERATOR, 10);
    (word as u16) ^ FORMAT_XOR_MASK
}

/// 18-bit version word; only meaningful for versions 7+
pub fn version_info_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    data << 12 | bch_remainder(data, VERSION_GENERATOR, 12)
}

/// Module of format bit `i` (LSB = 0) in the copy around the top-left finder
pub fn format_position_main(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Module of format bit `i` in the copy split across the other two finders
pub fn format_position_side(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

/// Modules of version bit `i`: below the top-right finder, then its transpose
pub fn version_positions(i: usize, size: usize) -> [(usize, usize); 2] {
    let a = size - 11 + i % 3;
    let b = i / 3;
    [(a, b), (b, a)]
}

/// Write both format copies and the dark module
pub fn write_format_info(modules: &mut BitMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let size = modules.width();
    let bits = format_info_bits(ec_level, mask);
    for i in 0..15 {
        let dark = (bits >> i) & 1 != 0;
        let (x, y) = format_position_main(i);
        modules.set(x, y, dark);
        let (x, y) = format_position_side(i, size);
        modules.set(x, y, dark);
    }
    modules.set(8, size - 8, true);
}

/// Write both version blocks (no-op below version 7)
pub fn write_version_info(modules: &mut BitMatrix, version: Version) {
    if !version.has_version_info() {
        return;
    }
    let size = modules.width();
    let bits = version_info_bits(version);
    for i in 0..18 {
        let dark = (bits >> i) & 1 != 0;
        for (x, y) in version_positions(i, size) {
            modules.set(x, y, dark);
        }
    }
}
