//! Ergonomic wrappers over `hough-lines-core` that accept `image` inputs.
//!
//! This crate is organized into a few focused modules:
//! - [`image`] – `GrayImage` helpers for edge maps, line detection and the
//!   vote histogram plot.
//! - [`luma`] – luminance extraction from RGB images.
//! - [`draw`] – rendering detected lines back onto an image.
//! - [`app`] – config-driven runner shared by the CLI and examples.

pub mod app;
pub mod draw;
pub mod image;
pub mod luma;

// Re-export a focused subset of core types for convenience. Consumers that
// need lower-level primitives (raw responses, quantization helpers) are
// encouraged to depend on `hough-lines-core` directly.
pub use hough_lines_core::{
    Error, Grid, HoughAccumulator, Kernel, Line, LineParams, LineResult, LineSet,
};

pub use crate::draw::{draw_lines, line_endpoints};
pub use crate::image::{
    detect_edges_image, find_lines_image, find_lines_image_trace, grid_from_gray, grid_to_gray,
    histogram_image,
};
pub use crate::luma::{luminance, luminance_image};
