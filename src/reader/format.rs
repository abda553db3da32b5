//! Format and version information extraction
use crate::encoder::format::{
    format_info_bits, format_position_main, format_position_side, version_info_bits,
    version_positions,
};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Largest Hamming distance accepted for format and version words
const MAX_DISTANCE: u32 = 3;

/// Decoded format information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
    /// Bit errors in the better copy
    pub distance: u32,
}

impl FormatInfo {
    /// Decode the better of the two format copies
    pub fn extract(matrix: &BitMatrix) -> Option<Self> {
        let size = matrix.width();
        let get = |(x, y): (usize, usize)| matrix.get(x, y);
        let main = read_word(15, |i| get(format_position_main(i)));
        let side = read_word(15, |i| get(format_position_side(i, size)));
        Self::decode(main as u16, side as u16)
    }

    /// Nearest valid format word to either copy
    pub fn decode(main: u16, side: u16) -> Option<Self> {
        let mut best: Option<Self> = None;
        for ec_level in ECLevel::ALL {
            for mask_pattern in MaskPattern::ALL {
                let word = format_info_bits(ec_level, mask_pattern);
                let distance = (word ^ main).count_ones().min((word ^ side).count_ones());
                if best.is_none_or(|b| distance < b.distance) {
                    best = Some(Self {
                        ec_level,
                        mask_pattern,
                        distance,
                    });
                }
            }
        }
        best.filter(|b| b.distance <= MAX_DISTANCE)
    }
}

/// Version number from the version blocks (versions 7+ only)
pub fn extract_version(matrix: &BitMatrix) -> Option<Version> {
    let size = matrix.width();
    let get = |(x, y): (usize, usize)| matrix.get(x, y);
    let first = read_word(18, |i| get(version_positions(i, size)[0]));
    let second = read_word(18, |i| get(version_positions(i, size)[1]));
    decode_version(first, second)
}

/// Nearest valid version word to either copy
pub fn decode_version(first: u32, second: u32) -> Option<Version> {
    (7..=40)
        .filter_map(Version::new)
        .map(|v| {
            let word = version_info_bits(v);
            let distance = (word ^ first).count_ones().min((word ^ second).count_ones());
            (distance, v)
        })
        .min_by_key(|&(distance, v)| (distance, v))
        .filter(|&(distance, _)| distance <= MAX_DISTANCE)
        .map(|(_, v)| v)
}

fn read_word(len: usize, bit: impl Fn(usize) -> bool) -> u32 {
    (0..len).fold(0, |word, i| word | (u32::from(bit(i)) << i))
}
