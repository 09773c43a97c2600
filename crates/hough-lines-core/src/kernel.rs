//! Fixed 3×3 convolution kernels. Rows are top to bottom, columns left to
//! right, centered on the output pixel.

/// Integer weights over a 3×3 neighborhood, indexed `[dy + 1][dx + 1]`.
pub type Kernel3 = [[i32; 3]; 3];

/// Discrete Laplace operator (4-neighborhood second derivative).
pub const LAPLACE_3X3: Kernel3 = [[0, 1, 0], [1, -4, 1], [0, 1, 0]];

/// Sobel derivative along x.
pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Sobel derivative along y.
pub const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// The closed set of edge kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Kernel {
    Laplace,
    SobelHorizontal,
    SobelVertical,
    /// Euclidean magnitude of the two Sobel responses.
    #[default]
    SobelCombined,
}

impl Kernel {
    pub const ALL: [Kernel; 4] = [
        Kernel::Laplace,
        Kernel::SobelHorizontal,
        Kernel::SobelVertical,
        Kernel::SobelCombined,
    ];

    /// Stable lowercase name, used for output file names and config values.
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Laplace => "laplace",
            Kernel::SobelHorizontal => "sobel_horizontal",
            Kernel::SobelVertical => "sobel_vertical",
            Kernel::SobelCombined => "sobel_combined",
        }
    }

    /// Weight table for single-table kernels; `None` for [`Kernel::SobelCombined`].
    #[inline]
    pub fn weights(self) -> Option<&'static Kernel3> {
        match self {
            Kernel::Laplace => Some(&LAPLACE_3X3),
            Kernel::SobelHorizontal => Some(&SOBEL_X),
            Kernel::SobelVertical => Some(&SOBEL_Y),
            Kernel::SobelCombined => None,
        }
    }
}

impl core::str::FromStr for Kernel {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "laplace" | "laplacian" => Ok(Kernel::Laplace),
            "sobel_horizontal" | "horizontal" | "sobel_x" => Ok(Kernel::SobelHorizontal),
            "sobel_vertical" | "vertical" | "sobel_y" => Ok(Kernel::SobelVertical),
            "sobel_combined" | "sobel" | "combined" => Ok(Kernel::SobelCombined),
            other => Err(format!(
                "invalid kernel '{other}', expected laplace|sobel_horizontal|sobel_vertical|sobel_combined"
            )),
        }
    }
}

impl core::fmt::Display for Kernel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_sum_to_zero() {
        for k in [LAPLACE_3X3, SOBEL_X, SOBEL_Y] {
            let s: i32 = k.iter().flatten().sum();
            assert_eq!(s, 0);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for k in Kernel::ALL {
            assert_eq!(k.name().parse::<Kernel>(), Ok(k));
        }
        assert_eq!("Sobel-Vertical".parse::<Kernel>(), Ok(Kernel::SobelVertical));
        assert!("prewitt".parse::<Kernel>().is_err());
    }
}
