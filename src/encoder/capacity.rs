//! Version and capacity selection
use log::debug;

use crate::config::EncodeOptions;
use crate::encoder::segment::{Segment, segment_as, segment_optimally, total_bits};
use crate::encoder::tables::data_codewords;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};

/// Terminator length counted toward the requirement
const TERMINATOR_BITS: usize = 4;

/// Outcome of version selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Smallest version that holds the data
    pub version: Version,
    /// Level to encode at (raised above the request when boosting)
    pub ec_level: ECLevel,
    /// Segments laid out for `version`'s count widths
    pub segments: Vec<Segment>,
    /// Segment bits before terminator and padding
    pub data_bits: usize,
}

/// Bits needed for `data_bits` of segments: terminator then byte alignment
pub fn required_bits(data_bits: usize) -> usize {
    (data_bits + TERMINATOR_BITS).div_ceil(8) * 8
}

/// Data capacity of (version, level) in bits
pub fn capacity_bits(version: Version, ec_level: ECLevel) -> usize {
    data_codewords(version, ec_level) * 8
}

/// Pick the smallest version in the option range that fits `data`
pub fn select_version(data: &[u8], opts: &EncodeOptions) -> Result<Selection> {
    if opts.min_version > opts.max_version {
        return Err(QrError::InvalidVersionRange {
            min: opts.min_version,
            max: opts.max_version,
        });
    }

    let forced = match opts.mode {
        Some(mode) => Some(segment_as(data, mode)?),
        None => None,
    };
    // Automatic partitions only change with the count-field class.
    let mut by_class: [Option<Vec<Segment>>; 3] = [None, None, None];
    let mut segments_for = |version: Version| -> Vec<Segment> {
        if let Some(segments) = &forced {
            return segments.clone();
        }
        by_class[version.size_class()]
            .get_or_insert_with(|| segment_optimally(data, version))
            .clone()
    };

    let level = opts.ec_level;
    for version in opts.min_version.range_to(opts.max_version) {
        let segments = segments_for(version);
        let Some(data_bits) = total_bits(&segments, version) else {
            continue;
        };
        if required_bits(data_bits) <= capacity_bits(version, level) {
            let ec_level = if opts.boost_ec_level {
                boosted_level(data_bits, version, level)
            } else {
                level
            };
            debug!(
                "selected version {} level {} for {} data bits in {} segments",
                version,
                ec_level,
                data_bits,
                segments.len()
            );
            return Ok(Selection {
                version,
                ec_level,
                segments,
                data_bits,
            });
        }
    }

    let version = opts.max_version;
    let segments = segments_for(version);
    let data_bits: usize = segments.iter().map(|s| s.bit_len(version)).sum();
    let required = required_bits(data_bits);
    let capacity = capacity_bits(version, level);
    debug!(
        "{} bits do not fit version {} level {} ({} bits)",
        required, version, level, capacity
    );
    Err(QrError::CapacityExceeded {
        required_bits: required,
        capacity_bits: capacity,
        version,
        level,
    })
}

/// Highest level at or above `level` that still holds `data_bits` at `version`
fn boosted_level(data_bits: usize, version: Version, level: ECLevel) -> ECLevel {
    ECLevel::ALL
        .into_iter()
        .filter(|&l| l >= level)
        .rfind(|&l| required_bits(data_bits) <= capacity_bits(version, l))
        .unwrap_or(level)
}
