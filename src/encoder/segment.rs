//! Data segments and mode partitioning
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::modes::Mode;
use crate::error::{QrError, Result};
use crate::models::Version;

const MODE_INDICATOR_BITS: usize = 4;

/// A run of input committed to one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    data: Vec<u8>,
}

impl Segment {
    /// Create a segment, rejecting bytes outside the mode's character set
    pub fn new(mode: Mode, data: Vec<u8>) -> Result<Self> {
        if let Some(index) = data.iter().position(|&b| !mode.can_encode(b)) {
            return Err(QrError::Encoding {
                mode,
                index,
                byte: data[index],
            });
        }
        Ok(Self { mode, data })
    }

    /// Segment mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Symbols in this segment (ASCII for numeric/alphanumeric)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Value written to the character-count field
    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    /// Whether the character count fits the count field at `version`
    pub fn count_fits(&self, version: Version) -> bool {
        self.char_count() < 1 << self.mode.char_count_bits(version)
    }

    /// Encoded size including mode indicator and count field
    pub fn bit_len(&self, version: Version) -> usize {
        MODE_INDICATOR_BITS
            + self.mode.char_count_bits(version)
            + self.mode.data_bits(self.char_count())
    }

    /// Append header and payload to `buf`
    pub fn write(&self, version: Version, buf: &mut BitBuffer) {
        buf.append_bits(self.mode.indicator(), MODE_INDICATOR_BITS);
        buf.append_bits(self.char_count() as u32, self.mode.char_count_bits(version));
        self.mode.write_data(&self.data, buf);
    }
}

/// Total encoded bits of `segments`, `None` if any count overflows its field
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .map(|s| s.count_fits(version).then(|| s.bit_len(version)))
        .sum()
}

/// Encode all of `data` in one forced mode
pub fn segment_as(data: &[u8], mode: Mode) -> Result<Vec<Segment>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![Segment::new(mode, data.to_vec())?])
}

/// Minimal-cost partition of `data` into mode runs for `version`'s count widths
///
/// Costs are tracked in sixths of a bit so numeric (10/3) and alphanumeric
/// (11/2) runs stay exact per character; a run is rounded up to whole bits
/// when a new segment header is opened after it.
pub fn segment_optimally(data: &[u8], version: Version) -> Vec<Segment> {
    if data.is_empty() {
        return Vec::new();
    }

    let header = |mode: Mode| (MODE_INDICATOR_BITS + mode.char_count_bits(version)) * 6;
    let mut costs: [usize; 3] = Mode::ALL.map(header);
    let mut came_from: Vec<[usize; 3]> = Vec::with_capacity(data.len());

    for (i, &byte) in data.iter().enumerate() {
        let mut next = [usize::MAX; 3];
        let mut from = [0usize; 3];
        for (m, mode) in Mode::ALL.iter().enumerate() {
            if !mode.can_encode(byte) {
                continue;
            }
            let mut best = costs[m];
            let mut best_from = m;
            if i > 0 {
                for (o, &cost) in costs.iter().enumerate() {
                    if o == m || cost == usize::MAX {
                        continue;
                    }
                    let switched = cost.div_ceil(6) * 6 + header(*mode);
                    if switched < best {
                        best = switched;
                        best_from = o;
                    }
                }
            }
            next[m] = best.saturating_add(mode.scaled_char_cost());
            from[m] = best_from;
        }
        came_from.push(from);
        costs = next;
    }

    // Byte mode accepts everything, so at least one cost is finite.
    let mut mode_idx = (0..3).min_by_key(|&m| (costs[m], m)).unwrap_or(2);
    let mut modes = vec![Mode::Byte; data.len()];
    for i in (0..data.len()).rev() {
        modes[i] = Mode::ALL[mode_idx];
        mode_idx = came_from[i][mode_idx];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for end in 1..=data.len() {
        if end == data.len() || modes[end] != modes[start] {
            segments.push(Segment {
                mode: modes[start],
                data: data[start..end].to_vec(),
            });
            start = end;
        }
    }
    segments
}
