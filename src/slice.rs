//! Extraction and replacement of contiguous mode ranges.
//!
//! Bounds follow Python slicing: negative indices count back from `m`, and
//! both bounds are clamped into `[0, m]`.
//!
//! ```text
//!   |1,2,0,3>.slice(1, 3, 1)          → |2,0>
//!   |1,2,0,3>.slice(-3, 4, 2)         → |2,3>
//!   |1,2,0,3>.set_slice(|5,5>, 1, 3)  → |1,5,5,3>
//! ```

use alloc::vec::Vec;

use crate::error::{FockError, Result};
use crate::state::FockState;

impl FockState {
    /// Resolve Python-style bounds into `[0, m]`.
    fn clamp_bounds(&self, start: isize, end: isize) -> (usize, usize) {
        let m = self.m as isize;
        let resolve = |i: isize| {
            let i = if i < 0 { i + m } else { i };
            i.clamp(0, m) as usize
        };
        (resolve(start), resolve(end))
    }

    /// Sub-state over modes `start, start+step, ...` below `end`.
    ///
    /// Photons outside the selected modes are dropped; the rest are
    /// renumbered to `(mode - start) / step` and keep their annotations.
    pub fn slice(&self, start: isize, end: isize, step: usize) -> Result<FockState> {
        if step == 0 {
            return Err(FockError::InvalidStep);
        }
        let (start, end) = self.clamp_bounds(start, end);
        let code = self.defined_modes()?;
        let slice_m = if end > start { (end - start).div_ceil(step) } else { 0 };

        let kept: Vec<usize> = code
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c >= start && c < end && (c - start) % step == 0)
            .map(|(k, _)| k)
            .collect();
        if kept.is_empty() {
            return Ok(FockState::with_modes(slice_m));
        }
        let mut state = FockState::from_encoding(
            slice_m,
            kept.iter().map(|&k| (code[k] - start) / step).collect(),
        );
        if self.has_annotations() {
            state.annotations = kept.iter().map(|&k| self.annotation_of(k)).collect();
        }
        Ok(state)
    }

    /// Copy of `self` with modes `[start, end)` replaced by `replacement`.
    ///
    /// `replacement.m()` must equal the width of the range. The mode count is
    /// unchanged; the photon count becomes `n - slice_n + replacement.n()`.
    pub fn set_slice(&self, replacement: &FockState, start: isize, end: isize) -> Result<FockState> {
        let (start, end) = self.clamp_bounds(start, end);
        let code = self.defined_modes()?;
        let width = end.saturating_sub(start);
        if replacement.m != width {
            return Err(FockError::SliceWidthMismatch {
                expected: width,
                found: replacement.m,
            });
        }
        let inserted = replacement.defined_modes()?;

        let lo = code.partition_point(|&c| c < start);
        let hi = code.partition_point(|&c| c < end).max(lo);
        let mut merged = Vec::with_capacity(lo + inserted.len() + code.len() - hi);
        merged.extend_from_slice(&code[..lo]);
        merged.extend(inserted.iter().map(|&c| c + start));
        merged.extend_from_slice(&code[hi..]);
        if merged.is_empty() {
            return Ok(FockState::with_modes(self.m));
        }

        let mut state = FockState::from_encoding(self.m, merged);
        if self.has_annotations() || replacement.has_annotations() {
            state.annotations = (0..lo)
                .map(|k| self.annotation_of(k))
                .chain((0..inserted.len()).map(|k| replacement.annotation_of(k)))
                .chain((hi..code.len()).map(|k| self.annotation_of(k)))
                .collect();
        }
        Ok(state)
    }
}
