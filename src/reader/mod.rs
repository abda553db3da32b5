//! Symbol reader
//!
//! Reads a finished module matrix back into its payload: format and version
//! information, unmasking, zig-zag extraction, de-interleaving, Reed-Solomon
//! correction and segment parsing. It works on clean grids only; there is no
//! image detection or sampling here.

use log::debug;

use crate::encoder::function_mask::FunctionMask;
use crate::encoder::mask::apply_mask;
use crate::encoder::placement::ZigZag;
use crate::encoder::segment::Segment;
use crate::error::ReadError;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Format and version information extraction
pub mod format;
/// Block de-interleaving and segment parsing
mod payload;
/// Reed-Solomon decoding
pub mod reed_solomon;

use format::{FormatInfo, extract_version};

/// A symbol read back from its modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Version implied by the side length
    pub version: Version,
    /// Level from the format information
    pub ec_level: ECLevel,
    /// Mask from the format information
    pub mask_pattern: MaskPattern,
    /// Parsed segments in stream order
    pub segments: Vec<Segment>,
    /// Concatenated segment payloads
    pub data: Vec<u8>,
    /// `data` as text (lossy UTF-8)
    pub content: String,
    /// Codewords fixed by error correction
    pub corrected: usize,
}

/// Decode a square module matrix (true = dark, no quiet zone)
pub fn read_matrix(matrix: &BitMatrix) -> Result<DecodedSymbol, ReadError> {
    decode_symbol(matrix).inspect_err(|e| debug!("readback failed: {e}"))
}

fn decode_symbol(matrix: &BitMatrix) -> Result<DecodedSymbol, ReadError> {
    let (width, height) = (matrix.width(), matrix.height());
    let version = Version::from_size(width)
        .filter(|_| width == height)
        .ok_or(ReadError::InvalidDimension { width, height })?;

    if version.has_version_info() {
        let found = extract_version(matrix);
        if found != Some(version) {
            return Err(ReadError::VersionMismatch {
                expected: version,
                found,
            });
        }
    }

    let format = FormatInfo::extract(matrix).ok_or(ReadError::FormatUnreadable)?;
    if format.distance > 0 {
        debug!("format information had {} bit errors", format.distance);
    }

    let func = FunctionMask::new(version);
    let mut unmasked = matrix.clone();
    apply_mask(&mut unmasked, &func, format.mask_pattern);
    let bits: Vec<bool> = ZigZag::new(&func)
        .map(|(x, y)| unmasked.get(x, y))
        .collect();
    let codewords = payload::codewords_from_bits(&bits);

    let (data_codewords, corrected) =
        payload::deinterleave_and_correct(&codewords, version, format.ec_level)?;
    let segments = payload::parse_segments(&data_codewords, version)?;
    let data: Vec<u8> = segments.iter().flat_map(|s| s.data().to_vec()).collect();
    let content = String::from_utf8_lossy(&data).into_owned();

    Ok(DecodedSymbol {
        version,
        ec_level: format.ec_level,
        mask_pattern: format.mask_pattern,
        segments,
        data,
        content,
        corrected,
    })
}
