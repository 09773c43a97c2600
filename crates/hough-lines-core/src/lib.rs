//! Core primitives for edge convolution and Hough-transform line detection.
//!
//! # Overview
//!
//! This crate exposes the building blocks of a two-stage line detector:
//!
//! - [`edges`] – dense gradient magnitude on 8‑bit grayscale grids using one
//!   of the fixed 3×3 kernels in [`kernel`].
//! - [`hough`] – the (theta, r) vote matrix and its quantization rules.
//! - [`detect`] – voting over edge pixels and extraction of the lines whose
//!   cell reaches the confidence threshold, plus convenience wrappers that
//!   run both stages.
//! - [`line`] – polar line parameters and the deduplicated [`LineSet`].
//!
//! Every stage allocates a fresh output; inputs are never mutated.
//!
//! # Features
//!
//! - `rayon` – parallelizes the convolution over image rows and the vote
//!   loop over theta buckets. Each theta bucket only ever receives votes
//!   computed with its own angle, so buckets are independent and are still
//!   scanned in row-major pixel order. Results are bit-identical to the
//!   sequential path.
//! - `tracing` – emits `tracing` spans for each stage.

pub mod detect;
pub mod edges;
pub mod error;
pub mod hough;
pub mod kernel;
pub mod line;

pub use crate::detect::{detect_lines_from_edges, find_lines, find_lines_with_trace, LineResult};
pub use crate::edges::detect_edges;
pub use crate::error::{Error, Result};
pub use crate::hough::{HoughAccumulator, HoughResult};
pub use crate::kernel::Kernel;
pub use crate::line::{Line, LineSet};

/// Finest supported angular resolution: 0.005° per theta bucket.
pub const MAX_THETA_BUCKETS: usize = 36_000;

/// Tunable parameters for edge detection and line voting.
///
/// Defaults: Sobel combined edges, both thresholds at 128, 1° theta buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct LineParams {
    /// Kernel used to build the edge map that feeds the vote.
    pub kernel: Kernel,
    /// Minimum edge magnitude for a pixel to cast votes.
    pub edge_threshold: u8,
    /// A line is accepted when its cell reaches exactly this many votes.
    pub vote_threshold: u32,
    /// Number of angle buckets covering `[0, π)`.
    pub theta_buckets: usize,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            kernel: Kernel::SobelCombined,
            edge_threshold: 128,
            vote_threshold: 128,
            theta_buckets: 180,
        }
    }
}

impl LineParams {
    /// Reject parameter sets that would make the vote meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.theta_buckets == 0 {
            return Err(Error::InvalidParams("theta_buckets must be >= 1"));
        }
        if self.theta_buckets > MAX_THETA_BUCKETS {
            return Err(Error::InvalidParams("theta_buckets must be <= 36000"));
        }
        if self.vote_threshold == 0 {
            return Err(Error::InvalidParams("vote_threshold must be >= 1"));
        }
        Ok(())
    }

    /// Angle step between two consecutive theta buckets, in radians.
    #[inline]
    pub fn theta_step(&self) -> f64 {
        core::f64::consts::PI / self.theta_buckets as f64
    }
}

/// Dense 8-bit grid in row-major layout.
///
/// Used for luminance inputs and edge-magnitude outputs alike; the units
/// differ but the shape and range do not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl Grid {
    /// All-zero grid of the given shape.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0u8; w * h],
        }
    }

    /// Grid filled with a single value.
    pub fn from_pixel(w: usize, h: usize, value: u8) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Wrap an owned row-major buffer, checking that it matches `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<u8>) -> Result<Self> {
        if w.checked_mul(h) != Some(data.len()) {
            return Err(Error::DimensionMismatch {
                width: w,
                height: h,
                len: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Copy a borrowed row-major buffer, checking that it matches `w * h`.
    pub fn from_u8_slice(w: usize, h: usize, data: &[u8]) -> Result<Self> {
        Self::from_vec(w, h, data.to_vec())
    }

    #[inline]
    /// Value at an integer coordinate. Panics when out of bounds.
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    /// Bounds-checked value at an integer coordinate.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.w && y < self.h).then(|| self.data[y * self.w + x])
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    /// Fail with [`Error::DimensionMismatch`] unless the buffer holds exactly
    /// `w * h` values.
    ///
    /// Every stage calls this before indexing.
    pub fn check_shape(&self) -> Result<()> {
        if self.w.checked_mul(self.h) != Some(self.data.len()) {
            return Err(Error::DimensionMismatch {
                width: self.w,
                height: self.h,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}
