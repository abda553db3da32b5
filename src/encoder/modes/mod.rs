//! QR data modes
//!
//! Each mode has a small codec module:
//! - Numeric: digits 0-9, three per 10 bits
//! - Alphanumeric: 0-9, A-Z, space and `$%*+-./:`, two per 11 bits
//! - Byte: arbitrary 8-bit data (UTF-8 text in practice)

use std::fmt;

use crate::encoder::bitstream::BitBuffer;
use crate::models::Version;

pub mod alphanumeric;
pub mod byte;
pub mod numeric;

/// Segment encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Mode 0001
    Numeric,
    /// Mode 0010
    Alphanumeric,
    /// Mode 0100
    Byte,
}

impl Mode {
    /// Modes from narrowest to widest character set
    pub const ALL: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];

    /// Four-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Mode for a four-bit indicator (0000 is the terminator, not a mode)
    pub fn from_indicator(indicator: u32) -> Option<Self> {
        match indicator {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            _ => None,
        }
    }

    /// Width of the character-count field at `version`
    pub fn char_count_bits(&self, version: Version) -> usize {
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
        };
        widths[version.size_class()]
    }

    /// Payload bits for `count` characters, headers excluded
    pub fn data_bits(&self, count: usize) -> usize {
        match self {
            Mode::Numeric => numeric::data_bits(count),
            Mode::Alphanumeric => alphanumeric::data_bits(count),
            Mode::Byte => count * 8,
        }
    }

    /// Whether `byte` belongs to this mode's character set
    pub fn can_encode(&self, byte: u8) -> bool {
        match self {
            Mode::Numeric => byte.is_ascii_digit(),
            Mode::Alphanumeric => alphanumeric::value_of(byte).is_some(),
            Mode::Byte => true,
        }
    }

    /// Narrowest mode that can hold `byte`
    pub fn narrowest_for(byte: u8) -> Mode {
        Self::ALL
            .into_iter()
            .find(|mode| mode.can_encode(byte))
            .unwrap_or(Mode::Byte)
    }

    /// Payload cost per character in sixths of a bit, for segmentation
    pub(crate) fn scaled_char_cost(&self) -> usize {
        match self {
            Mode::Numeric => 20,
            Mode::Alphanumeric => 33,
            Mode::Byte => 48,
        }
    }

    /// Write the payload of `data`, which must be valid for this mode
    pub(crate) fn write_data(&self, data: &[u8], buf: &mut BitBuffer) {
        match self {
            Mode::Numeric => numeric::encode(data, buf),
            Mode::Alphanumeric => alphanumeric::encode(data, buf),
            Mode::Byte => byte::encode(data, buf),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_indicator(mode.indicator()), Some(mode));
        }
        assert_eq!(Mode::from_indicator(0), None);
        assert_eq!(Mode::from_indicator(0b1000), None);
    }

    #[test]
    fn test_char_count_bits() {
        let v = |n| Version::new(n).unwrap();
        assert_eq!(Mode::Numeric.char_count_bits(v(1)), 10);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(10)), 11);
        assert_eq!(Mode::Byte.char_count_bits(v(9)), 8);
        assert_eq!(Mode::Byte.char_count_bits(v(40)), 16);
        assert_eq!(Mode::Numeric.char_count_bits(v(27)), 14);
    }

    #[test]
    fn test_narrowest_mode() {
        assert_eq!(Mode::narrowest_for(b'7'), Mode::Numeric);
        assert_eq!(Mode::narrowest_for(b'Q'), Mode::Alphanumeric);
        assert_eq!(Mode::narrowest_for(b' '), Mode::Alphanumeric);
        assert_eq!(Mode::narrowest_for(b'q'), Mode::Byte);
        assert_eq!(Mode::narrowest_for(0xC3), Mode::Byte);
    }
}
