//! `image::GrayImage` helpers for the line detector.
//!
//! These wrappers expose the core `hough-lines-core` stages in terms of
//! `GrayImage`, which is convenient for loading inputs and saving the
//! diagnostic maps.

use hough_lines_core::{detect, edges, Grid, HoughAccumulator, Kernel, LineParams, LineSet};
use image::{GrayImage, Luma};

/// Copy a `GrayImage` into a core [`Grid`].
///
/// Fails if the image's backing buffer is not exactly `width * height`.
pub fn grid_from_gray(img: &GrayImage) -> hough_lines_core::Result<Grid> {
    Grid::from_u8_slice(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Copy a core [`Grid`] into a `GrayImage` of the same shape.
pub fn grid_to_gray(grid: &Grid) -> GrayImage {
    GrayImage::from_fn(grid.w as u32, grid.h as u32, |x, y| {
        Luma([grid.at(x as usize, y as usize)])
    })
}

/// Edge-magnitude map of a `GrayImage`.
#[inline]
pub fn detect_edges_image(img: &GrayImage, kernel: Kernel) -> hough_lines_core::Result<GrayImage> {
    let grid = grid_from_gray(img)?;
    Ok(grid_to_gray(&edges::detect_edges(&grid, kernel)?))
}

/// Detect lines from a `GrayImage` luminance input.
#[inline]
pub fn find_lines_image(img: &GrayImage, params: &LineParams) -> hough_lines_core::Result<LineSet> {
    detect::find_lines(&grid_from_gray(img)?, params)
}

/// Detect lines from a `GrayImage`, keeping intermediate maps and timings.
#[inline]
pub fn find_lines_image_trace(
    img: &GrayImage,
    params: &LineParams,
) -> hough_lines_core::Result<detect::LineResult> {
    detect::find_lines_with_trace(&grid_from_gray(img)?, params)
}

/// Scatter plot of the vote matrix: theta along x, r along y, counts
/// saturated at 255.
pub fn histogram_image(acc: &HoughAccumulator) -> GrayImage {
    grid_to_gray(&acc.to_grid())
}
