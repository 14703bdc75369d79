// Split-Gaussian fantasy-point density.
//
// A player's floor/mid/ceiling trio is read as the 15th/50th/85th percentile
// of their weekly outcome. The density is a two-piece bell: a Gaussian with
// one standard deviation left of the mode and another to the right, derived
// from the spread between the quantiles. The density is continuous but
// kinked at the mode, and unnormalized; probability queries depend on both
// properties (see module `curve`).

use crate::curve::Density;

/// z-score of the 85th percentile of a standard normal.
pub const Z85: f64 = 1.036;

/// Minimum standard deviation; keeps degenerate trios renderable.
pub const SIGMA_FLOOR: f64 = 0.1;

/// A two-piece normal centered on the mid estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitGaussian {
    pub mode: f64,
    pub sigma_left: f64,
    pub sigma_right: f64,
}

/// Floor a derived sigma: non-positive and non-finite spreads collapse to
/// `SIGMA_FLOOR` so the density never divides by zero or produces NaN.
fn floor_sigma(sigma: f64) -> f64 {
    if sigma.is_finite() {
        sigma.max(SIGMA_FLOOR)
    } else {
        SIGMA_FLOOR
    }
}

impl SplitGaussian {
    /// Derive the two-sided density from a floor/mid/ceiling trio.
    ///
    /// `sigma_right = max(0.1, |ceiling - mid| / z85)` and
    /// `sigma_left = max(0.1, |mid - floor| / z85)`.
    pub fn from_trio(floor: f64, mid: f64, ceiling: f64) -> Self {
        SplitGaussian {
            mode: mid,
            sigma_left: floor_sigma((mid - floor).abs() / Z85),
            sigma_right: floor_sigma((ceiling - mid).abs() / Z85),
        }
    }

    /// Convenience for projection rows where estimates may be absent:
    /// missing values are treated as 0, matching the rendering layer.
    pub fn from_optional_trio(
        floor: Option<f64>,
        mid: Option<f64>,
        ceiling: Option<f64>,
    ) -> Self {
        SplitGaussian::from_trio(
            floor.unwrap_or(0.0),
            mid.unwrap_or(0.0),
            ceiling.unwrap_or(0.0),
        )
    }
}

impl Density for SplitGaussian {
    fn density_at(&self, x: f64) -> f64 {
        let s = if x >= self.mode {
            self.sigma_right
        } else {
            self.sigma_left
        };
        let z = (x - self.mode) / s;
        (-0.5 * z * z).exp()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
