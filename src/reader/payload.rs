use crate::encoder::bitstream::{BitReader, bits_to_codewords};
use crate::encoder::modes::{Mode, alphanumeric, byte, numeric};
use crate::encoder::segment::Segment;
use crate::encoder::tables::ec_block_info;
use crate::error::ReadError;
use crate::models::{ECLevel, Version};
use crate::reader::reed_solomon::ReedSolomonDecoder;

/// Pack the zig-zag bitstream into codewords, dropping remainder bits
pub(super) fn codewords_from_bits(bits: &[bool]) -> Vec<u8> {
    bits_to_codewords(bits)
}

/// Undo the interleave, correct every block and concatenate the data codewords
///
/// Returns the data codewords and the number of corrected codewords.
pub(super) fn deinterleave_and_correct(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<(Vec<u8>, usize), ReadError> {
    let info = ec_block_info(version, ec_level);
    if codewords.len() < info.total_codewords {
        return Err(ReadError::MalformedPayload("too few codewords"));
    }

    let long_len = info.short_block_len() + 1;
    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|_| Vec::with_capacity(long_len + info.ecc_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..long_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < info.block_len(b) {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(stream.next());
        }
    }

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data_out = Vec::with_capacity(info.data_codewords());
    let mut corrected = 0;
    for (b, block) in blocks.iter_mut().enumerate() {
        corrected += rs
            .decode(block)
            .map_err(|_| ReadError::Uncorrectable { block: b })?;
        data_out.extend_from_slice(&block[..info.block_len(b)]);
    }

    Ok((data_out, corrected))
}

/// Parse data codewords into segments, stopping at the terminator
pub(super) fn parse_segments(
    data_codewords: &[u8],
    version: Version,
) -> Result<Vec<Segment>, ReadError> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect();
    let mut reader = BitReader::new(&bits);
    let mut segments = Vec::new();

    // A terminator may be cut short when the data exactly fills the symbol
    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4).unwrap_or(0);
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator)
            .ok_or(ReadError::MalformedPayload("unsupported mode indicator"))?;
        let count = reader
            .read_bits(mode.char_count_bits(version))
            .ok_or(ReadError::MalformedPayload("truncated character count"))?
            as usize;

        let decoded = match mode {
            Mode::Numeric => numeric::decode(reader.rest(), count)
                .map(|(text, used)| (text.into_bytes(), used)),
            Mode::Alphanumeric => alphanumeric::decode(reader.rest(), count)
                .map(|(text, used)| (text.into_bytes(), used)),
            Mode::Byte => byte::decode(reader.rest(), count),
        };
        let (data, used) =
            decoded.ok_or(ReadError::MalformedPayload("segment data truncated or invalid"))?;
        reader.advance(used);

        let segment = Segment::new(mode, data)
            .map_err(|_| ReadError::MalformedPayload("segment data outside its mode"))?;
        segments.push(segment);
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::segment::segment_optimally;
    use crate::encoder::{data_codewords, final_codewords};

    #[test]
    fn test_parse_hello_world() {
        let cw = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let segments = parse_segments(&cw, Version::MIN).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].mode(), Mode::Alphanumeric);
        assert_eq!(segments[0].data(), b"HELLO WORLD");
    }

    #[test]
    fn test_parse_mixed_segments() {
        let version = Version::new(2).unwrap();
        let input = b"abc012345678901234567890";
        let segments = segment_optimally(input, version);
        let cw = data_codewords(&segments, version, ECLevel::M);
        assert_eq!(parse_segments(&cw, version).unwrap(), segments);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        // 1000 is Kanji, which this reader does not handle
        let cw = [0b1000_0000, 0, 0, 0];
        assert_eq!(
            parse_segments(&cw, Version::MIN),
            Err(ReadError::MalformedPayload("unsupported mode indicator"))
        );
    }

    #[test]
    fn test_deinterleave_round_trip_with_damage() {
        let version = Version::new(5).unwrap();
        let segments = segment_optimally(b"INTERLEAVED BLOCKS 5-Q", version);
        let data = data_codewords(&segments, version, ECLevel::Q);
        let mut cw = final_codewords(&segments, version, ECLevel::Q);
        cw[0] ^= 0xFF;
        cw[1] ^= 0x0F;
        cw[70] ^= 0x33;
        let (recovered, corrected) = deinterleave_and_correct(&cw, version, ECLevel::Q).unwrap();
        assert_eq!(recovered, data);
        assert_eq!(corrected, 3);
    }

    #[test]
    fn test_uncorrectable_block_reported() {
        let version = Version::MIN;
        let mut cw = final_codewords(&[], version, ECLevel::L);
        for byte in cw.iter_mut().take(6) {
            *byte ^= 0xA5;
        }
        assert!(matches!(
            deinterleave_and_correct(&cw, version, ECLevel::L),
            Err(ReadError::Uncorrectable { block: 0 })
        ));
    }
}
