//! Rendering of detected lines onto an image.
//!
//! Drawing never mutates its input: callers get a fresh image back.

use hough_lines_core::{Line, LineSet};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

pub const LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

type Point = (f64, f64);

/// Endpoints of `line` on the borders of a `w × h` image, as float pixel
/// coordinates. See [`Line::endpoints`] for which borders are used.
pub fn line_endpoints(line: &Line, w: u32, h: u32) -> ((f32, f32), (f32, f32)) {
    let (a, b) = line.endpoints(w, h);
    ((a[0] as f32, a[1] as f32), (b[0] as f32, b[1] as f32))
}

/// Copy of `base` with every line drawn in [`LINE_COLOR`] with a 2-pixel stroke.
pub fn draw_lines(base: &RgbImage, lines: &LineSet) -> RgbImage {
    let mut out = base.clone();
    let (w, h) = out.dimensions();

    for line in lines {
        let (a, b) = line.endpoints(w, h);
        let a = (a[0] as f64, a[1] as f64);
        let b = (b[0] as f64, b[1] as f64);

        // second pass shifted one pixel along the dominant normal axis
        let (sin_t, cos_t) = line.theta.sin_cos();
        let shift = if sin_t.abs() >= cos_t.abs() {
            (0.0, 1.0)
        } else {
            (1.0, 0.0)
        };

        for (dx, dy) in [(0.0, 0.0), shift] {
            let p = (a.0 + dx, a.1 + dy);
            let q = (b.0 + dx, b.1 + dy);
            if let Some((p, q)) = clip_segment(p, q, w, h) {
                draw_line_segment_mut(
                    &mut out,
                    (p.0 as f32, p.1 as f32),
                    (q.0 as f32, q.1 as f32),
                    LINE_COLOR,
                );
            }
        }
    }

    out
}

/// Liang–Barsky clip of the segment `p0 → p1` to the pixel rectangle of a
/// `w × h` image. `None` when nothing of the segment is inside.
fn clip_segment(p0: Point, p1: Point, w: u32, h: u32) -> Option<(Point, Point)> {
    if w == 0 || h == 0 {
        return None;
    }
    let x_max = (w - 1) as f64;
    let y_max = (h - 1) as f64;
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, p0.0), (dx, x_max - p0.0), (-dy, p0.1), (dy, y_max - p0.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else if t < t0 {
            return None;
        } else {
            t1 = t1.min(t);
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}
