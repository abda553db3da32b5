//! Zig-zag data module order
//!
//! Columns are walked in pairs from the right edge, alternating upward and
//! downward, with the vertical timing column skipped. Within a pair the right
//! module comes first. Function modules are skipped, so the iterator yields
//! exactly the data modules in codeword bit order.
use crate::encoder::function_mask::FunctionMask;

/// Lazy iterator over data module coordinates `(x, y)`
pub struct ZigZag<'a> {
    func: &'a FunctionMask,
    size: usize,
    // Right column of the current pair; 0 once exhausted
    right: usize,
    vert: usize,
    j: usize,
}

impl<'a> ZigZag<'a> {
    pub fn new(func: &'a FunctionMask) -> Self {
        let size = func.size();
        Self {
            func,
            size,
            right: size - 1,
            vert: 0,
            j: 0,
        }
    }

    fn advance(&mut self) {
        self.j += 1;
        if self.j < 2 {
            return;
        }
        self.j = 0;
        self.vert += 1;
        if self.vert < self.size {
            return;
        }
        self.vert = 0;
        self.right = match self.right {
            0 | 1 => 0,
            // The pair ending at column 6 shifts left past the timing column
            8 => 5,
            r => r - 2,
        };
    }
}

impl Iterator for ZigZag<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.right >= 1 {
            let x = self.right - self.j;
            let upward = (self.right + 1) & 2 == 0;
            let y = if upward {
                self.size - 1 - self.vert
            } else {
                self.vert
            };
            self.advance();
            if !self.func.is_function(x, y) {
                return Some((x, y));
            }
        }
        None
    }
}
