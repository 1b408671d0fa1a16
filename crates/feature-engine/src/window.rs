//! Sliding Window Contract
//!
//! One windowing rule shared by every reducer: windows start at
//! `0, stride, 2*stride, ...` while `start + size <= n`, and a window's
//! output row carries the timestamp of its center row
//! (`start + size / 2`). Windows are never padded or wrapped, so a series
//! shorter than one window produces no output at all.

use serde::{Deserialize, Serialize};

/// Sliding-window geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Rows per window
    pub size: usize,
    /// Grid rows between successive window starts
    pub stride: usize,
}

impl WindowSpec {
    /// Create a window spec; size and stride must be positive.
    pub fn new(size: usize, stride: usize) -> Self {
        assert!(size > 0 && stride > 0, "window size and stride must be positive");
        Self { size, stride }
    }

    /// Whether the geometry is usable
    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.stride > 0
    }

    /// Start indices of every complete window over `n` rows.
    pub fn starts(&self, n: usize) -> impl Iterator<Item = usize> {
        (0..n.saturating_sub(self.size.saturating_sub(1))).step_by(self.stride.max(1))
    }

    /// Center row of the window starting at `start`.
    pub fn center(&self, start: usize) -> usize {
        start + self.size / 2
    }

    /// Number of complete windows over `n` rows:
    /// `max(0, (n - size) / stride + 1)`.
    pub fn count(&self, n: usize) -> usize {
        if n < self.size {
            0
        } else {
            (n - self.size) / self.stride.max(1) + 1
        }
    }
}
