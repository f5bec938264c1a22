//! Position and active range within the frame sequence.

use thiserror::Error;

/// Rejected navigation or range requests. State is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// Target index is outside the frame sequence
    #[error("Frame {index} is out of bounds (0..{total})")]
    OutOfBounds {
        /// Requested 0-based index
        index: i64,
        /// Number of frames
        total: usize,
    },

    /// Target index is outside the active range
    #[error("Frame {index} is outside the active range {min}..={max}")]
    OutsideRange {
        /// Requested 0-based index
        index: i64,
        /// Range start
        min: usize,
        /// Range end (inclusive)
        max: usize,
    },

    /// Requested range is empty, reversed, or exceeds the sequence
    #[error("Range {min}..={max} is out of bounds for {total} frames")]
    InvalidRange {
        /// Requested start
        min: i64,
        /// Requested end (inclusive)
        max: i64,
        /// Number of frames
        total: usize,
    },
}

/// Index into the full frame sequence, constrained to `[range_min, range_max]`.
///
/// Indices are 0-based; the inclusive window always lies within `[0, total)`
/// when `total > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameNavigator {
    index: usize,
    total: usize,
    range_min: usize,
    range_max: usize,
}

impl FrameNavigator {
    /// Start at the first frame with the range covering the whole sequence.
    pub fn new(total: usize) -> Self {
        Self {
            index: 0,
            total,
            range_min: 0,
            range_max: total.saturating_sub(1),
        }
    }

    /// Current 0-based index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of frames in the sequence.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Active range as `(min, max)`, both inclusive.
    pub fn range(&self) -> (usize, usize) {
        (self.range_min, self.range_max)
    }

    /// Whether `index` lies in the active range.
    pub fn in_range(&self, index: usize) -> bool {
        self.range_min <= index && index <= self.range_max
    }

    /// Whether the index sits on the last frame of the range.
    pub fn at_range_end(&self) -> bool {
        self.index >= self.range_max
    }

    /// Whether the index sits on the first frame of the range.
    pub fn at_range_start(&self) -> bool {
        self.index <= self.range_min
    }

    /// Restrict navigation to `[min, max]`.
    ///
    /// Requires `0 <= min <= max < total`. On success the current index is
    /// clamped into the new window.
    pub fn set_range(&mut self, min: i64, max: i64) -> Result<(), NavigationError> {
        let total = self.total;
        let invalid = NavigationError::InvalidRange { min, max, total };
        if min < 0 || min > max {
            return Err(invalid);
        }
        let (Ok(min_idx), Ok(max_idx)) = (usize::try_from(min), usize::try_from(max)) else {
            return Err(invalid);
        };
        if max_idx >= total {
            return Err(invalid);
        }

        self.range_min = min_idx;
        self.range_max = max_idx;
        self.clamp();
        log::debug!("Range set to {}..={}", min_idx, max_idx);
        Ok(())
    }

    /// Reset the range to the full sequence.
    pub fn clear_range(&mut self) {
        self.range_min = 0;
        self.range_max = self.total.saturating_sub(1);
        self.clamp();
    }

    /// Move one frame forward. Returns false at the end of the range.
    pub fn step_forward(&mut self) -> bool {
        if self.is_empty() || self.at_range_end() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move one frame back. Returns false at the start of the range.
    pub fn step_back(&mut self) -> bool {
        if self.is_empty() || self.at_range_start() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move directly to `target`, which must be inside the sequence and the range.
    pub fn jump_to(&mut self, target: i64) -> Result<usize, NavigationError> {
        let index = usize::try_from(target)
            .ok()
            .filter(|&i| i < self.total)
            .ok_or(NavigationError::OutOfBounds {
                index: target,
                total: self.total,
            })?;

        if !self.in_range(index) {
            return Err(NavigationError::OutsideRange {
                index: target,
                min: self.range_min,
                max: self.range_max,
            });
        }

        self.index = index;
        Ok(index)
    }

    /// Pull the index back inside the active range.
    pub fn clamp(&mut self) {
        self.index = self.index.clamp(self.range_min, self.range_max);
    }
}
