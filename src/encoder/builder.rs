//! Module matrix construction: function patterns, then data placement
use crate::encoder::format::write_version_info;
use crate::encoder::function_mask::FunctionMask;
use crate::encoder::placement::ZigZag;
use crate::encoder::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Unmasked symbol under construction
///
/// `new` draws every function pattern and the version blocks; format areas
/// stay light until a mask is chosen.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    version: Version,
    modules: BitMatrix,
    func: FunctionMask,
}

impl MatrixBuilder {
    pub fn new(version: Version) -> Self {
        let mut builder = Self {
            version,
            modules: BitMatrix::square(version.size()),
            func: FunctionMask::new(version),
        };
        builder.draw_timing_patterns();
        builder.draw_finder_patterns();
        builder.draw_alignment_patterns();
        let size = version.size();
        builder.modules.set(8, size - 8, true);
        write_version_info(&mut builder.modules, version);
        builder
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    pub fn function_mask(&self) -> &FunctionMask {
        &self.func
    }

    /// Lay codeword bits MSB-first along the zig-zag path
    ///
    /// Modules past the last codeword are remainder bits and stay light.
    pub fn place_codewords(&mut self, codewords: &[u8]) {
        let bits = codewords
            .iter()
            .flat_map(|&cw| (0..8).rev().map(move |i| (cw >> i) & 1 != 0));
        for ((x, y), dark) in ZigZag::new(&self.func).zip(bits) {
            self.modules.set(x, y, dark);
        }
    }

    pub fn into_parts(self) -> (BitMatrix, FunctionMask) {
        (self.modules, self.func)
    }

    fn draw_timing_patterns(&mut self) {
        let size = self.version.size();
        for i in 0..size {
            self.modules.set(6, i, i % 2 == 0);
            self.modules.set(i, 6, i % 2 == 0);
        }
    }

    fn draw_finder_patterns(&mut self) {
        let far = self.version.size() - 4;
        for (cx, cy) in [(3, 3), (far, 3), (3, far)] {
            // Dark rings at distance 0, 1 and 3; separator ring at 4 is light
            self.draw_square_rings(cx, cy, 4, |d| d != 2 && d != 4);
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let positions = alignment_pattern_positions(self.version);
        let last = positions.len().saturating_sub(1);
        for (i, &cx) in positions.iter().enumerate() {
            for (j, &cy) in positions.iter().enumerate() {
                if FunctionMask::overlaps_finder(i, j, last) {
                    continue;
                }
                self.draw_square_rings(cx, cy, 2, |d| d != 1);
            }
        }
    }

    fn draw_square_rings(
        &mut self,
        cx: usize,
        cy: usize,
        radius: isize,
        dark: impl Fn(isize) -> bool,
    ) {
        let size = self.version.size() as isize;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let d = dx.abs().max(dy.abs());
                    self.modules.set(x as usize, y as usize, dark(d));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finder_pattern_shape() {
        let builder = MatrixBuilder::new(Version::MIN);
        let m = builder.modules();
        let row = |y: usize| -> String {
            (0..8).map(|x| if m.get(x, y) { '#' } else { '.' }).collect()
        };
        assert_eq!(row(0), "#######.");
        assert_eq!(row(1), "#.....#.");
        assert_eq!(row(2), "#.###.#.");
        assert_eq!(row(6), "#######.");
        assert_eq!(row(7), "........");
        // Top-right finder mirrors it
        assert!(m.get(20, 0) && m.get(14, 0) && !m.get(13, 0));
    }

    #[test]
    fn test_timing_and_dark_module() {
        let builder = MatrixBuilder::new(Version::new(2).unwrap());
        let m = builder.modules();
        for i in 8..17 {
            assert_eq!(m.get(i, 6), i % 2 == 0);
            assert_eq!(m.get(6, i), i % 2 == 0);
        }
        assert!(m.get(8, 25 - 8));
    }

    #[test]
    fn test_alignment_pattern_drawn() {
        // 2-x has a single alignment pattern centred at (18, 18)
        let builder = MatrixBuilder::new(Version::new(2).unwrap());
        let m = builder.modules();
        assert!(m.get(18, 18));
        assert!(!m.get(17, 18) && !m.get(19, 17));
        assert!(m.get(16, 16) && m.get(20, 18));
    }

    #[test]
    fn test_only_data_modules_change_on_placement() {
        let version = Version::new(3).unwrap();
        let mut builder = MatrixBuilder::new(version);
        let before = builder.modules().clone();
        builder.place_codewords(&[0xFF; 70]);
        let (after, func) = builder.into_parts();
        let size = version.size();
        for y in 0..size {
            for x in 0..size {
                if func.is_function(x, y) {
                    assert_eq!(before.get(x, y), after.get(x, y));
                }
            }
        }
        // 70 codewords fill 560 of 567 data modules; 7 remainder bits stay light
        let dark_data = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|&(x, y)| !func.is_function(x, y) && after.get(x, y))
            .count();
        assert_eq!(dark_data, 560);
    }
}
