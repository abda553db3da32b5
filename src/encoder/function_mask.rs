use crate::encoder::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module or reserved area, false = data module.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::square(size);

        // Finders with their separators, clipped at the symbol edge
        Self::mark_rect(&mut mask, 0, 0, 8, 8);
        Self::mark_rect(&mut mask, size - 8, 0, 8, 8);
        Self::mark_rect(&mut mask, 0, size - 8, 8, 8);

        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                if Self::overlaps_finder(i, j, last) {
                    continue;
                }
                Self::mark_rect(&mut mask, cx - 2, cy - 2, 5, 5);
            }
        }

        // Format areas; (8, size - 8) is the dark module
        Self::mark_rect(&mut mask, 8, 0, 1, 9);
        Self::mark_rect(&mut mask, 0, 8, 9, 1);
        Self::mark_rect(&mut mask, size - 8, 8, 8, 1);
        Self::mark_rect(&mut mask, 8, size - 8, 1, 8);

        if version.has_version_info() {
            Self::mark_rect(&mut mask, size - 11, 0, 3, 6);
            Self::mark_rect(&mut mask, 0, size - 11, 6, 3);
        }

        Self { mask, version }
    }

    /// Alignment grid cells (i, j) that would sit on a finder
    pub(crate) fn overlaps_finder(i: usize, j: usize, last: usize) -> bool {
        (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0)
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.mask.count_set()
    }

    fn mark_rect(mask: &mut BitMatrix, x: usize, y: usize, width: usize, height: usize) {
        let size = mask.width();
        for yy in y..(y + height).min(size) {
            for xx in x..(x + width).min(size) {
                mask.set(xx, yy, true);
            }
        }
    }
}
