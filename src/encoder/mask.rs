//! Mask evaluation
//!
//! Every candidate is scored with its own format information in place, so
//! the winner is judged on exactly the modules it will ship with.
use log::trace;
use rayon::prelude::*;

use crate::encoder::format::write_format_info;
use crate::encoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const N1: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: u32 = 10;

// Version 10 and up
const PARALLEL_MIN_SIZE: usize = 57;

const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];
const FINDER_LIKE_REV: [bool; 11] = [
    false, false, false, false, true, false, true, true, true, false, true,
];

/// Winning mask and the scores it was chosen from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskChoice {
    pub mask: MaskPattern,
    pub score: u32,
    pub scores: [u32; 8],
}

/// Flip data modules selected by `mask`; function modules are untouched
pub fn apply_mask(modules: &mut BitMatrix, func: &FunctionMask, mask: MaskPattern) {
    let size = modules.width();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(y, x) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Masked copy of `modules` with format information for (level, mask)
pub fn masked_candidate(
    modules: &BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> BitMatrix {
    let mut candidate = modules.clone();
    apply_mask(&mut candidate, func, mask);
    write_format_info(&mut candidate, ec_level, mask);
    candidate
}

/// Score all eight masks, in pattern order
pub fn evaluate_masks(modules: &BitMatrix, func: &FunctionMask, ec_level: ECLevel) -> [u32; 8] {
    let score = |mask: MaskPattern| {
        let s = penalty_score(&masked_candidate(modules, func, ec_level, mask));
        trace!("mask {} penalty {}", mask.bits(), s);
        s
    };
    let mut scores = [0u32; 8];
    if modules.width() >= PARALLEL_MIN_SIZE {
        let computed: Vec<u32> = MaskPattern::ALL[..]
            .par_iter()
            .map(|&m| score(m))
            .collect();
        scores.copy_from_slice(&computed);
    } else {
        for (slot, &mask) in scores.iter_mut().zip(MaskPattern::ALL.iter()) {
            *slot = score(mask);
        }
    }
    scores
}

/// Lowest-penalty mask; ties go to the lower pattern index
pub fn select_mask(modules: &BitMatrix, func: &FunctionMask, ec_level: ECLevel) -> MaskChoice {
    let scores = evaluate_masks(modules, func, ec_level);
    let (best, &score) = scores
        .iter()
        .enumerate()
        .min_by_key(|&(i, &s)| (s, i))
        .unwrap_or((0, &scores[0]));
    MaskChoice {
        mask: MaskPattern::ALL[best],
        score,
        scores,
    }
}

/// Total penalty N1 + N2 + N3 + N4
pub fn penalty_score(m: &BitMatrix) -> u32 {
    let size = m.width();
    let rows: Vec<Vec<bool>> = (0..size).map(|y| m.row(y)).collect();
    let cols: Vec<Vec<bool>> = (0..size).map(|x| m.column(x)).collect();
    let lines = || rows.iter().chain(cols.iter());

    let runs: u32 = lines().map(|l| run_penalty(l)).sum();
    let finder: u32 = lines().map(|l| finder_like_penalty(l)).sum();
    runs + block_penalty(&rows) + finder + balance_penalty(m)
}

/// N1: 3 + (len - 5) for each run of five or more same-colour modules
pub fn run_penalty(line: &[bool]) -> u32 {
    let mut total = 0;
    let mut run = 0u32;
    let mut prev = None;
    for &module in line {
        if prev == Some(module) {
            run += 1;
        } else {
            total += run_cost(run);
            run = 1;
            prev = Some(module);
        }
    }
    total + run_cost(run)
}

fn run_cost(run: u32) -> u32 {
    if run >= 5 { N1 + run - 5 } else { 0 }
}

/// N2: 3 for each 2x2 block of one colour (overlapping blocks all count)
pub fn block_penalty(rows: &[Vec<bool>]) -> u32 {
    let mut total = 0;
    for pair in rows.windows(2) {
        let (top, bottom) = (&pair[0], &pair[1]);
        for x in 0..top.len().saturating_sub(1) {
            let c = top[x];
            if top[x + 1] == c && bottom[x] == c && bottom[x + 1] == c {
                total += N2;
            }
        }
    }
    total
}

/// N3: 40 for each 1:1:3:1:1 finder look-alike with four light modules on one side
pub fn finder_like_penalty(line: &[bool]) -> u32 {
    line.windows(11)
        .map(|w| {
            let mut hits = 0;
            if w == FINDER_LIKE.as_slice() {
                hits += N3;
            }
            if w == FINDER_LIKE_REV.as_slice() {
                hits += N3;
            }
            hits
        })
        .sum()
}

/// N4: 10 for each full 5% step the dark ratio strays from half
pub fn balance_penalty(m: &BitMatrix) -> u32 {
    let total = m.width() * m.height();
    if total == 0 {
        return 0;
    }
    let dark = m.count_set();
    let k = (dark * 20).abs_diff(total * 10) / total;
    N4 * k as u32
}
