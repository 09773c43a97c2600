//! Luminance (Y of YCbCr) extraction.

use hough_lines_core::{Grid, Result};
use image::{DynamicImage, Rgb, RgbImage};

/// BT.601 luma of one pixel, truncated toward zero.
#[inline]
pub fn luma_of(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    (0.299f32 * r as f32 + 0.587f32 * g as f32 + 0.114f32 * b as f32) as u8
}

/// Single-channel luminance grid of an RGB image.
pub fn luminance(img: &RgbImage) -> Result<Grid> {
    let data = img.pixels().map(|&p| luma_of(p)).collect();
    Grid::from_vec(img.width() as usize, img.height() as usize, data)
}

/// Luminance of any decoded image; non-RGB inputs are converted first.
pub fn luminance_image(img: &DynamicImage) -> Result<Grid> {
    match img {
        DynamicImage::ImageRgb8(rgb) => luminance(rgb),
        other => luminance(&other.to_rgb8()),
    }
}
