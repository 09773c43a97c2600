//! Line detection built on top of the edge map and the Hough vote matrix.
use crate::edges::detect_edges;
use crate::hough::{quantize_r, HoughAccumulator, HoughResult};
use crate::line::{Line, LineSet};
use crate::{Grid, LineParams, Result};
use std::time::Instant;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

/// Timed detection outcome with every intermediate product.
#[derive(Clone, Debug)]
pub struct LineResult {
    /// Edge-magnitude map fed to the vote.
    pub edges: Grid,
    /// Final vote matrix.
    pub accumulator: HoughAccumulator,
    /// Lines whose cell reached the vote threshold.
    pub lines: LineSet,
    /// Time spent on the convolution (milliseconds).
    pub edges_ms: f64,
    /// Time spent on voting and line extraction (milliseconds).
    pub hough_ms: f64,
}

/// Detect lines starting from a luminance grid.
///
/// This is a convenience that combines:
/// - detect_edges with `params.kernel`
/// - Hough voting over pixels at or above `params.edge_threshold`
pub fn find_lines(luma: &Grid, params: &LineParams) -> Result<LineSet> {
    params.validate()?;
    let edges = detect_edges(luma, params.kernel)?;
    Ok(detect_lines_from_edges(&edges, params)?.lines)
}

/// Same as [`find_lines`], keeping the intermediate maps and stage timings.
pub fn find_lines_with_trace(luma: &Grid, params: &LineParams) -> Result<LineResult> {
    params.validate()?;

    let edges_started = Instant::now();
    let edges = detect_edges(luma, params.kernel)?;
    let edges_ms = edges_started.elapsed().as_secs_f64() * 1000.0;

    let hough_started = Instant::now();
    let HoughResult { accumulator, lines } = detect_lines_from_edges(&edges, params)?;
    let hough_ms = hough_started.elapsed().as_secs_f64() * 1000.0;

    Ok(LineResult {
        edges,
        accumulator,
        lines,
        edges_ms,
        hough_ms,
    })
}

/// Core detector: vote over an existing edge map.
///
/// Every pixel whose magnitude is at least `edge_threshold` votes once per
/// theta bucket. A line `(r, theta)` is accepted at the moment its cell's
/// count becomes exactly `vote_threshold`, using the `r` of the pixel that
/// cast that vote. Later votes into the same cell never add it again.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(edges, params), fields(w = edges.w, h = edges.h))
)]
pub fn detect_lines_from_edges(edges: &Grid, params: &LineParams) -> Result<HoughResult> {
    params.validate()?;
    edges.check_shape()?;

    let mut accumulator = HoughAccumulator::new(edges.w, edges.h, params.theta_buckets);
    let trig = trig_table(&accumulator);

    #[cfg(feature = "rayon")]
    let lines = vote_by_theta(edges, params, &mut accumulator, &trig);
    #[cfg(not(feature = "rayon"))]
    let lines = vote_by_pixel(edges, params, &mut accumulator, &trig);

    #[cfg(feature = "tracing")]
    debug!(
        r_range = accumulator.r_range(),
        max_votes = accumulator.max_votes(),
        total_votes = accumulator.total_votes(),
        lines = lines.len(),
        "hough vote done"
    );

    Ok(HoughResult { accumulator, lines })
}

/// `(theta, cos, sin)` per theta bucket.
fn trig_table(acc: &HoughAccumulator) -> Vec<(f64, f64, f64)> {
    (0..acc.theta_buckets())
        .map(|t| {
            let theta = acc.theta_for(t);
            (theta, theta.cos(), theta.sin())
        })
        .collect()
}

// Reference order: row-major pixels, ascending theta bucket.
#[cfg_attr(feature = "rayon", allow(dead_code))]
fn vote_by_pixel(
    edges: &Grid,
    params: &LineParams,
    acc: &mut HoughAccumulator,
    trig: &[(f64, f64, f64)],
) -> LineSet {
    let mut lines = LineSet::new();

    for y in 0..edges.h {
        for x in 0..edges.w {
            if edges.at(x, y) < params.edge_threshold {
                continue;
            }

            for (t, &(theta, cos_t, sin_t)) in trig.iter().enumerate() {
                let r = x as f64 * cos_t + y as f64 * sin_t;
                if acc.vote(t, r) == params.vote_threshold {
                    lines.insert(Line::new(r, theta));
                }
            }
        }
    }

    lines
}

// A theta column only receives votes computed with its own angle, so each
// column can be filled independently while still seeing pixels in row-major
// order. Per-cell counts and trigger points match `vote_by_pixel` exactly.
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
fn vote_by_theta(
    edges: &Grid,
    params: &LineParams,
    acc: &mut HoughAccumulator,
    trig: &[(f64, f64, f64)],
) -> LineSet {
    let pixels = edge_pixels(edges, params.edge_threshold);
    if pixels.is_empty() || acc.r_range() == 0 {
        return LineSet::new();
    }
    let r_range = acc.r_range();
    let threshold = params.vote_threshold;

    let fill = |(t, column): (usize, &mut [u32])| -> Vec<Line> {
        let (theta, cos_t, sin_t) = trig[t];
        let mut found = Vec::new();
        for &(x, y) in &pixels {
            let r = x as f64 * cos_t + y as f64 * sin_t;
            let count = &mut column[quantize_r(r, r_range)];
            *count = count.saturating_add(1);
            if *count == threshold {
                found.push(Line::new(r, theta));
            }
        }
        found
    };

    #[cfg(feature = "rayon")]
    let found: Vec<Vec<Line>> = acc.par_columns_mut().enumerate().map(fill).collect();
    #[cfg(not(feature = "rayon"))]
    let found: Vec<Vec<Line>> = acc.columns_mut().enumerate().map(fill).collect();

    let mut lines = LineSet::new();
    for column_lines in found {
        lines.extend(column_lines);
    }
    lines
}

#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
fn edge_pixels(edges: &Grid, threshold: u8) -> Vec<(usize, usize)> {
    let mut pixels = Vec::new();
    for y in 0..edges.h {
        for (x, &v) in edges.row(y).iter().enumerate() {
            if v >= threshold {
                pixels.push((x, y));
            }
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Kernel};

    fn diagonal_edges(size: usize, len: usize) -> Grid {
        let mut g = Grid::new(size, size);
        for i in 0..len {
            g.data[i * size + i] = 255;
        }
        g
    }

    #[test]
    fn long_diagonal_is_reported_once_at_its_true_parameters() {
        let edges = diagonal_edges(200, 200);
        let res = detect_lines_from_edges(&edges, &LineParams::default()).unwrap();

        assert_eq!(res.lines.len(), 1);
        let line = res.lines.iter().next().unwrap();
        let expected_theta = 135.0 * (core::f64::consts::PI / 180.0);
        assert_eq!(line.theta, expected_theta);
        assert!(line.r.abs() < 1e-9, "r = {}", line.r);

        let acc = &res.accumulator;
        assert_eq!(acc.votes_at(135, acc.r_bucket(0.0)), 200);
    }

    #[test]
    fn short_diagonal_is_not_reported() {
        let edges = diagonal_edges(200, 127);
        let res = detect_lines_from_edges(&edges, &LineParams::default()).unwrap();
        assert!(res.lines.is_empty());
        assert_eq!(res.accumulator.max_votes(), 127);
    }

    #[test]
    fn diagonal_of_exactly_threshold_length_is_reported() {
        let edges = diagonal_edges(200, 128);
        let res = detect_lines_from_edges(&edges, &LineParams::default()).unwrap();

        assert_eq!(res.lines.len(), 1);
        let line = res.lines.iter().next().unwrap();
        assert_eq!(line.theta, 135.0 * (core::f64::consts::PI / 180.0));
        assert!(line.r.abs() < 1e-9, "r = {}", line.r);
        assert_eq!(res.accumulator.max_votes(), 128);
    }

    #[test]
    fn mismatched_grids_are_rejected_by_every_entry_point() {
        let bad = Grid {
            w: 10,
            h: 10,
            data: vec![255; 50],
        };
        let params = LineParams::default();
        let expected = Err(Error::DimensionMismatch {
            width: 10,
            height: 10,
            len: 50,
        });

        assert_eq!(detect_lines_from_edges(&bad, &params).map(|r| r.lines), expected);
        assert_eq!(find_lines(&bad, &params), expected);
        assert_eq!(find_lines_with_trace(&bad, &params).map(|r| r.lines), expected);
    }

    #[test]
    fn oversized_theta_resolution_is_rejected() {
        let params = LineParams {
            theta_buckets: usize::MAX / 2,
            ..Default::default()
        };
        assert!(matches!(
            detect_lines_from_edges(&Grid::new(8, 8), &params),
            Err(Error::InvalidParams(_))
        ));
        assert!(find_lines(&Grid::new(8, 8), &params).is_err());
    }

    #[test]
    fn pixels_below_edge_threshold_do_not_vote() {
        let edges = Grid::from_pixel(20, 20, 127);
        let res = detect_lines_from_edges(&edges, &LineParams::default()).unwrap();
        assert_eq!(res.accumulator.total_votes(), 0);
        assert!(res.lines.is_empty());
    }

    #[test]
    fn every_edge_pixel_votes_once_per_theta_bucket() {
        let mut edges = Grid::new(10, 10);
        edges.data[3 * 10 + 4] = 128;
        edges.data[7 * 10 + 1] = 200;
        let params = LineParams {
            theta_buckets: 90,
            ..Default::default()
        };
        let res = detect_lines_from_edges(&edges, &params).unwrap();
        assert_eq!(res.accumulator.total_votes(), 2 * 90);
        for t in 0..90 {
            assert_eq!(res.accumulator.column(t).iter().sum::<u32>(), 2);
        }
    }

    #[test]
    fn trigger_fires_only_when_count_equals_threshold() {
        // Three pixels on the same horizontal row all vote into one cell at
        // theta = π/2; with threshold 2 the line is captured by the second.
        let mut edges = Grid::new(8, 8);
        for x in [1usize, 3, 5] {
            edges.data[4 * 8 + x] = 255;
        }
        let params = LineParams {
            theta_buckets: 2,
            vote_threshold: 2,
            ..Default::default()
        };
        let res = detect_lines_from_edges(&edges, &params).unwrap();
        let horizontal: Vec<_> = res.lines.iter().filter(|l| l.theta > 0.0).collect();
        assert_eq!(horizontal.len(), 1);
        // r of the second voter: 3·cos(π/2) + 4·sin(π/2)
        let half_pi = core::f64::consts::PI / 2.0;
        assert_eq!(horizontal[0].r, 3.0 * half_pi.cos() + 4.0 * half_pi.sin());
        assert_eq!(res.accumulator.max_votes(), 3);
    }

    #[test]
    fn reference_and_partitioned_votes_agree() {
        let mut edges = Grid::new(60, 40);
        for i in 0..60 {
            edges.data[(i * 2 / 3) * 60 + i] = 255;
            edges.data[20 * 60 + i] = 200;
        }
        for y in 0..40 {
            edges.data[y * 60 + 45] = 130;
        }
        let params = LineParams {
            vote_threshold: 30,
            ..Default::default()
        };

        let mut a = HoughAccumulator::new(edges.w, edges.h, params.theta_buckets);
        let mut b = a.clone();
        let trig = trig_table(&a);
        let by_pixel = vote_by_pixel(&edges, &params, &mut a, &trig);
        let by_theta = vote_by_theta(&edges, &params, &mut b, &trig);

        assert_eq!(a, b);
        assert_eq!(by_pixel, by_theta);
        assert!(!by_pixel.is_empty());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let edges = diagonal_edges(160, 160);
        let params = LineParams::default();
        let first = detect_lines_from_edges(&edges, &params).unwrap();
        let second = detect_lines_from_edges(&edges, &params).unwrap();
        assert_eq!(first.lines, second.lines);
        assert_eq!(first.accumulator, second.accumulator);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = LineParams {
            vote_threshold: 0,
            ..Default::default()
        };
        assert!(detect_lines_from_edges(&Grid::new(4, 4), &params).is_err());
    }

    #[test]
    fn empty_grid_produces_no_lines() {
        let res = find_lines_with_trace(&Grid::new(0, 0), &LineParams::default()).unwrap();
        assert!(res.lines.is_empty());
        assert_eq!(res.accumulator.r_range(), 0);
        assert_eq!(res.edges.dimensions(), (0, 0));
    }

    #[test]
    fn trace_matches_plain_call() {
        let mut luma = Grid::new(64, 64);
        for y in 0..64 {
            for x in 32..64 {
                luma.data[y * 64 + x] = 255;
            }
        }
        let params = LineParams {
            kernel: Kernel::SobelHorizontal,
            vote_threshold: 40,
            ..Default::default()
        };
        let plain = find_lines(&luma, &params).unwrap();
        let traced = find_lines_with_trace(&luma, &params).unwrap();
        assert_eq!(plain, traced.lines);
        assert!(!plain.is_empty());
        assert!(traced.edges_ms >= 0.0 && traced.hough_ms >= 0.0);
    }
}
