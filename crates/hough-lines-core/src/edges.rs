//! Dense edge-magnitude maps from fixed 3×3 kernels.
//!
//! Only interior pixels (`1 ≤ x < w-1`, `1 ≤ y < h-1`) are evaluated. The
//! outer 1-pixel ring of the output stays 0: no padding, reflection or
//! wraparound is applied. Responses are saturated to `[0, 255]` after taking
//! the absolute value, so gradient strength above 255 is discarded.

use crate::kernel::{Kernel, Kernel3, SOBEL_X, SOBEL_Y};
use crate::{Grid, Result};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Convolve `img` with `kernel` and return the clamped magnitude map.
///
/// The output always has the shape of the input. Grids smaller than 3×3 have
/// no interior and produce an all-zero map. Fails with
/// [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) when the
/// buffer does not hold `w * h` values.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(img, kernel),
        fields(w = img.w, h = img.h, kernel = %kernel)
    )
)]
pub fn detect_edges(img: &Grid, kernel: Kernel) -> Result<Grid> {
    img.check_shape()?;
    let w = img.w;
    let h = img.h;
    let mut out = Grid::new(w, h);

    if w < 3 || h < 3 {
        return Ok(out);
    }

    #[cfg(feature = "rayon")]
    out.data
        .par_chunks_mut(w)
        .enumerate()
        .skip(1)
        .take(h - 2)
        .for_each(|(y, row)| fill_row(img, y, row, kernel));

    #[cfg(not(feature = "rayon"))]
    for (y, row) in out.data.chunks_mut(w).enumerate().skip(1).take(h - 2) {
        fill_row(img, y, row, kernel);
    }

    Ok(out)
}

/// Signed kernel response at `(x, y)`, before absolute value and clamping.
///
/// Returns `None` for border pixels, where the 3×3 neighborhood would leave
/// the grid, and for grids whose buffer does not match their shape. For [`Kernel::SobelCombined`] the value is the Euclidean
/// magnitude truncated toward zero, so it is never negative.
pub fn edge_response_at(img: &Grid, x: usize, y: usize, kernel: Kernel) -> Option<i32> {
    if x == 0 || y == 0 || x + 1 >= img.w || y + 1 >= img.h || img.check_shape().is_err() {
        return None;
    }
    Some(response_at(img, x, y, kernel))
}

/// Map a signed response to an 8-bit magnitude.
#[inline]
pub fn encode_magnitude(acc: i32) -> u8 {
    acc.unsigned_abs().min(255) as u8
}

fn fill_row(img: &Grid, y: usize, row: &mut [u8], kernel: Kernel) {
    for (x, out) in row.iter_mut().enumerate().take(img.w - 1).skip(1) {
        *out = encode_magnitude(response_at(img, x, y, kernel));
    }
}

#[inline]
fn response_at(img: &Grid, x: usize, y: usize, kernel: Kernel) -> i32 {
    match kernel.weights() {
        Some(k) => apply_3x3(img, x, y, k),
        None => {
            let gx = apply_3x3(img, x, y, &SOBEL_X) as f64;
            let gy = apply_3x3(img, x, y, &SOBEL_Y) as f64;
            gx.hypot(gy) as i32
        }
    }
}

#[inline]
fn apply_3x3(img: &Grid, x: usize, y: usize, k: &Kernel3) -> i32 {
    let mut acc = 0i32;
    for (ky, k_row) in k.iter().enumerate() {
        let row = img.row(y + ky - 1);
        acc += k_row[0] * row[x - 1] as i32
            + k_row[1] * row[x] as i32
            + k_row[2] * row[x + 1] as i32;
    }
    acc
}
