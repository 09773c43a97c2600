//! Polar line parameters and the deduplicated set of accepted lines.

use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Infinite line `x·cos(theta) + y·sin(theta) = r`.
///
/// `theta` is in `[0, π)`; `r` is signed. Two lines are the same line only
/// when both values are bit-for-bit equal; ordering is by `theta`, then `r`.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub r: f64,
    pub theta: f64,
}

impl Line {
    pub fn new(r: f64, theta: f64) -> Self {
        Self { r, theta }
    }

    /// `theta` in degrees.
    #[inline]
    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }

    /// Two points on the line, at the borders of a `w × h` image.
    ///
    /// When `sin(theta) != 0` the line is intersected with `x = 0` and
    /// `x = w`; a vertical line (`sin(theta) == 0`) is intersected with
    /// `y = 0` and `y = h` instead. Coordinates are truncated toward zero
    /// and may fall outside the image.
    pub fn endpoints(&self, w: u32, h: u32) -> ([i32; 2], [i32; 2]) {
        let (sin_t, cos_t) = self.theta.sin_cos();
        if sin_t != 0.0 {
            let x2 = w as f64;
            let y1 = self.r / sin_t;
            let y2 = (self.r - x2 * cos_t) / sin_t;
            ([0, y1 as i32], [w as i32, y2 as i32])
        } else {
            let y2 = h as f64;
            let x1 = self.r / cos_t;
            let x2 = (self.r - y2 * sin_t) / cos_t;
            ([x1 as i32, 0], [x2 as i32, h as i32])
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Line {}

impl PartialOrd for Line {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Line {
    fn cmp(&self, other: &Self) -> Ordering {
        self.theta
            .total_cmp(&other.theta)
            .then_with(|| self.r.total_cmp(&other.r))
    }
}

/// Accepted lines with set semantics and a deterministic iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: BTreeSet<Line>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line; returns `false` if an identical line was already present.
    pub fn insert(&mut self, line: Line) -> bool {
        self.lines.insert(line)
    }

    pub fn contains(&self, line: &Line) -> bool {
        self.lines.contains(line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines ordered by `theta`, then `r`.
    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter()
    }

    pub fn extend<I: IntoIterator<Item = Line>>(&mut self, lines: I) {
        self.lines.extend(lines);
    }
}

impl FromIterator<Line> for LineSet {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LineSet {
    type Item = Line;
    type IntoIter = std::collections::btree_set::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a Line;
    type IntoIter = std::collections::btree_set::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
