//! QR code encoding modules
//!
//! The pipeline runs leaves first:
//! - Segmentation into numeric, alphanumeric and byte runs
//! - Version selection against the capacity tables
//! - Terminator, padding and Reed-Solomon error correction
//! - Function patterns and zig-zag data placement
//! - Mask evaluation, then format and version information

use log::debug;

use crate::config::EncodeOptions;
use crate::error::Result;
use crate::models::{ECLevel, QrCode, Version};

/// Bit buffer and reader shared with the symbol reader
pub mod bitstream;
/// Block split, EC generation and interleaving
pub mod blocks;
/// Matrix construction
pub mod builder;
/// Smallest-version search
pub mod capacity;
/// Format and version information (BCH)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Mask patterns and penalty scoring
pub mod mask;
/// Data mode codecs (numeric, alphanumeric, byte)
pub mod modes;
/// Zig-zag module order
pub mod placement;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Segments and optimal mode partitioning
pub mod segment;
/// Standard QR tables (ECC codewords/blocks, alignment positions)
pub mod tables;

use bitstream::BitBuffer;
use blocks::{interleave, split_and_protect};
use builder::MatrixBuilder;
use capacity::select_version;
use segment::Segment;
use tables::ec_block_info;

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Data codewords for `segments`: terminator, byte alignment, then pad bytes
///
/// The segments must fit the (version, level) capacity.
pub fn data_codewords(segments: &[Segment], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity = tables::data_codewords(version, ec_level) * 8;
    let mut buf = BitBuffer::with_capacity(capacity);
    for segment in segments {
        segment.write(version, &mut buf);
    }
    debug_assert!(buf.len() <= capacity);

    let terminator = (capacity - buf.len()).min(4);
    buf.append_bits(0, terminator);
    let fill = (8 - buf.len() % 8) % 8;
    buf.append_bits(0, fill);

    let mut codewords = buf.to_codewords();
    let pad_count = capacity / 8 - codewords.len();
    codewords.extend(PAD_BYTES.iter().cycle().take(pad_count));
    codewords
}

/// Full final codeword sequence (data and EC, interleaved)
pub fn final_codewords(segments: &[Segment], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let data = data_codewords(segments, version, ec_level);
    interleave(&split_and_protect(&data, &info))
}

/// Encode `data` into a finished symbol
pub fn encode_with_options(data: &[u8], opts: &EncodeOptions) -> Result<QrCode> {
    let selection = select_version(data, opts)?;
    let version = selection.version;
    let ec_level = selection.ec_level;

    let codewords = final_codewords(&selection.segments, version, ec_level);
    let mut builder = MatrixBuilder::new(version);
    builder.place_codewords(&codewords);
    let (unmasked, func) = builder.into_parts();

    let mask_pattern = match opts.mask {
        Some(mask) => mask,
        None => {
            let choice = mask::select_mask(&unmasked, &func, ec_level);
            debug!(
                "mask {} chosen with penalty {} (scores {:?})",
                choice.mask.bits(),
                choice.score,
                choice.scores
            );
            choice.mask
        }
    };

    let modules = mask::masked_candidate(&unmasked, &func, ec_level, mask_pattern);
    Ok(QrCode::new(version, ec_level, mask_pattern, modules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::modes::Mode;

    #[test]
    fn test_hello_world_data_codewords() {
        let segments = segment::segment_as(b"HELLO WORLD", Mode::Alphanumeric).unwrap();
        let cw = data_codewords(&segments, Version::MIN, ECLevel::M);
        assert_eq!(
            cw,
            vec![32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17]
        );
    }

    #[test]
    fn test_empty_payload_is_all_padding() {
        let cw = data_codewords(&[], Version::MIN, ECLevel::M);
        assert_eq!(cw.len(), 16);
        assert_eq!(cw[0], 0);
        assert_eq!(&cw[1..5], &[0xEC, 0x11, 0xEC, 0x11]);
    }

    #[test]
    fn test_short_terminator_at_capacity() {
        // 151 bits against 152 for 1-L: the terminator shrinks to one bit
        let digits = [b'7'; 41];
        let segments = segment::segment_as(&digits, Mode::Numeric).unwrap();
        let bits = segment::total_bits(&segments, Version::MIN).unwrap();
        assert_eq!(bits, 4 + 10 + 137);
        let cw = data_codewords(&segments, Version::MIN, ECLevel::L);
        assert_eq!(cw.len(), 19);
    }

    #[test]
    fn test_final_codewords_length() {
        for n in [1, 5, 10, 27, 40] {
            let version = Version::new(n).unwrap();
            for level in ECLevel::ALL {
                let cw = final_codewords(&[], version, level);
                assert_eq!(cw.len(), ec_block_info(version, level).total_codewords);
            }
        }
    }

    #[test]
    fn test_forced_mask_is_used() {
        let opts = EncodeOptions::default().with_mask(crate::models::MaskPattern::Pattern6);
        let code = encode_with_options(b"forced", &opts).unwrap();
        assert_eq!(code.mask_pattern().bits(), 6);
    }
}
