//! Error type shared by the core stages.

/// Failures of the detection core.
///
/// Out-of-range intensities, vote counts and bucket indices are never
/// reported here; they are saturated by clamping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A buffer or a chained stage does not match the expected grid shape.
    #[error("grid of {width}x{height} does not match buffer of {len} values")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
