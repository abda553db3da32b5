//! Block split, error correction and interleaving
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::EcBlockInfo;

/// Data codewords of one block with their EC codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordBlock {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Split `data` into consecutive blocks and compute each block's EC codewords
pub fn split_and_protect(data: &[u8], info: &EcBlockInfo) -> Vec<CodewordBlock> {
    debug_assert_eq!(data.len(), info.data_codewords());
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for b in 0..info.num_blocks {
        let len = info.block_len(b);
        let chunk = &data[offset..offset + len];
        blocks.push(CodewordBlock {
            data: chunk.to_vec(),
            ecc: rs.remainder(chunk),
        });
        offset += len;
    }
    blocks
}

/// Column-wise interleave: data codewords across blocks, then EC codewords
pub fn interleave(blocks: &[CodewordBlock]) -> Vec<u8> {
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();
    let mut out = Vec::with_capacity(total);
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for i in 0..max_data {
        out.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    let ecc_len = blocks.first().map_or(0, |b| b.ecc.len());
    for i in 0..ecc_len {
        out.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::ec_block_info;
    use crate::models::{ECLevel, Version};

    #[test]
    fn test_single_block() {
        let info = ec_block_info(Version::MIN, ECLevel::M);
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let blocks = split_and_protect(&data, &info);
        assert_eq!(blocks.len(), 1);
        let out = interleave(&blocks);
        assert_eq!(&out[..16], &data);
        assert_eq!(&out[16..], &[196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
    }

    #[test]
    fn test_interleave_mixed_lengths() {
        // 5-Q: blocks of 15, 15, 16, 16 data codewords
        let info = ec_block_info(Version::new(5).unwrap(), ECLevel::Q);
        let data: Vec<u8> = (0..62).collect();
        let blocks = split_and_protect(&data, &info);
        assert_eq!(blocks[0].data[0], 0);
        assert_eq!(blocks[1].data[0], 15);
        assert_eq!(blocks[2].data[0], 30);
        assert_eq!(blocks[3].data[0], 46);

        let out = interleave(&blocks);
        assert_eq!(out.len(), info.total_codewords);
        assert_eq!(&out[..4], &[0, 15, 30, 46]);
        // Row 15 only exists in the long blocks
        assert_eq!(&out[60..62], &[45, 61]);
        assert_eq!(out[62], blocks[0].ecc[0]);
        assert_eq!(out[63], blocks[1].ecc[0]);
        assert_eq!(*out.last().unwrap(), blocks[3].ecc[17]);
    }
}
