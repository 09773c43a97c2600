//! Hough parameter space: a `(theta, r)` vote matrix and its quantization.
//!
//! `theta` is split into `theta_buckets` equal steps over `[0, π)`. The
//! signed distance `r` is shifted by half of `r_range` and rounded, so that
//! every line crossing the image lands in `[0, r_range)`. Anything outside
//! that range is clamped onto the first or last bucket rather than dropped.

use crate::line::LineSet;
use crate::Grid;

/// Output of a vote: the full matrix plus the lines that reached the threshold.
#[derive(Clone, Debug)]
pub struct HoughResult {
    pub accumulator: HoughAccumulator,
    pub lines: LineSet,
}

/// Number of r buckets needed to cover every signed distance of a line that
/// crosses a `w × h` image: `ceil(2 · hypot(w, h))`.
#[inline]
pub fn r_range_for(w: usize, h: usize) -> usize {
    (2.0 * (w as f64).hypot(h as f64)).ceil() as usize
}

/// Quantize a signed distance into `[0, r_range)`.
///
/// The offset is `r_range / 2` in integer arithmetic; the shifted value is
/// rounded to the nearest bucket and clamped.
#[inline]
pub fn quantize_r(r: f64, r_range: usize) -> usize {
    let max = r_range.saturating_sub(1) as f64;
    let half = (r_range / 2) as f64;
    (r + half).round().clamp(0.0, max) as usize
}

/// Vote counts indexed by `(theta_bucket, r_bucket)`.
///
/// Storage is theta-major: each theta bucket owns a contiguous column of
/// `r_range` counters. Counts only grow while a vote is running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoughAccumulator {
    theta_buckets: usize,
    r_range: usize,
    votes: Vec<u32>,
}

impl HoughAccumulator {
    /// Empty matrix sized for a `w × h` image.
    pub fn new(w: usize, h: usize, theta_buckets: usize) -> Self {
        let r_range = r_range_for(w, h);
        Self {
            theta_buckets,
            r_range,
            votes: vec![0u32; theta_buckets * r_range],
        }
    }

    #[inline]
    pub fn theta_buckets(&self) -> usize {
        self.theta_buckets
    }

    #[inline]
    pub fn r_range(&self) -> usize {
        self.r_range
    }

    #[inline]
    pub fn theta_step(&self) -> f64 {
        core::f64::consts::PI / self.theta_buckets as f64
    }

    /// Angle of a theta bucket: `bucket · π / theta_buckets`.
    #[inline]
    pub fn theta_for(&self, theta_bucket: usize) -> f64 {
        theta_bucket as f64 * self.theta_step()
    }

    #[inline]
    pub fn r_bucket(&self, r: f64) -> usize {
        quantize_r(r, self.r_range)
    }

    /// Add one vote for `r` in `theta_bucket` and return the new count.
    ///
    /// Panics if `theta_bucket >= theta_buckets`.
    #[inline]
    pub fn vote(&mut self, theta_bucket: usize, r: f64) -> u32 {
        let idx = theta_bucket * self.r_range + self.r_bucket(r);
        let count = &mut self.votes[idx];
        *count = count.saturating_add(1);
        *count
    }

    /// Bounds-checked vote count; 0 outside the matrix.
    #[inline]
    pub fn votes_at(&self, theta_bucket: usize, r_bucket: usize) -> u32 {
        if theta_bucket < self.theta_buckets && r_bucket < self.r_range {
            self.votes[theta_bucket * self.r_range + r_bucket]
        } else {
            0
        }
    }

    /// All counts of one theta bucket, indexed by r bucket.
    pub fn column(&self, theta_bucket: usize) -> &[u32] {
        let start = theta_bucket * self.r_range;
        &self.votes[start..start + self.r_range]
    }

    #[cfg(not(feature = "rayon"))]
    pub(crate) fn columns_mut(&mut self) -> core::slice::ChunksMut<'_, u32> {
        self.votes.chunks_mut(self.r_range.max(1))
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn par_columns_mut(&mut self) -> rayon::slice::ChunksMut<'_, u32> {
        use rayon::prelude::*;
        let r_range = self.r_range.max(1);
        self.votes.par_chunks_mut(r_range)
    }

    pub fn max_votes(&self) -> u32 {
        self.votes.iter().copied().max().unwrap_or(0)
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|&v| v as u64).sum()
    }

    /// Render the matrix as a diagnostic grid: x is the theta bucket, y the
    /// r bucket, and counts above 255 saturate.
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new(self.theta_buckets, self.r_range);
        for t in 0..self.theta_buckets {
            for (r, &v) in self.column(t).iter().enumerate() {
                grid.data[r * self.theta_buckets + t] = v.min(255) as u8;
            }
        }
        grid
    }
}
