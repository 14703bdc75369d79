// Betting-market stat curves.
//
// Continuous markets (pass yards, receptions, ...) render as a symmetric
// Gaussian around the bookmaker-implied mean. Binary markets (anytime TD)
// have no meaningful spread and render as a two-bar over/under probability
// instead of a curve.

use crate::curve::Density;
use crate::projections::MarketStat;

/// Market key for the anytime-touchdown prop, always rendered as binary.
pub const ANYTIME_TD_KEY: &str = "player_anytime_td";

/// Fallback standard deviation when a market carries none. Missing, zero
/// and NaN sigmas all resolve here.
pub const SIGMA_EPS: f64 = 1e-6;

/// How a market stat is visualized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarketCurve {
    /// A symmetric Gaussian density around the implied mean.
    Continuous(MarketModel),
    /// A bare over/under probability; no curve.
    Binary { p_over: f64 },
}

/// Symmetric Gaussian density for a continuous market stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketModel {
    pub mean: f64,
    pub sigma: f64,
}

impl MarketModel {
    pub fn new(mean: f64, sigma: f64) -> Self {
        MarketModel {
            mean,
            sigma: resolve_sigma(Some(sigma)),
        }
    }

    pub fn from_stat(stat: &MarketStat) -> Self {
        MarketModel {
            mean: stat.mean,
            sigma: resolve_sigma(stat.sigma),
        }
    }
}

impl Density for MarketModel {
    fn density_at(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.sigma;
        (-0.5 * z * z).exp()
    }
}

/// Resolve a raw sigma the way the dashboard did: missing, zero and NaN all
/// fall back to `SIGMA_EPS`.
fn resolve_sigma(sigma: Option<f64>) -> f64 {
    match sigma {
        Some(s) if s != 0.0 && !s.is_nan() => s,
        _ => SIGMA_EPS,
    }
}

/// Classify a market stat for rendering.
///
/// Binary when the key is the anytime-TD prop, or when the threshold is 0
/// and the resolved sigma is non-finite. A binary market with no recorded
/// over probability defaults to an even 0.5.
pub fn classify(key: &str, stat: &MarketStat) -> MarketCurve {
    let sigma = resolve_sigma(stat.sigma);
    let is_binary = key == ANYTIME_TD_KEY || (stat.threshold == 0.0 && !sigma.is_finite());
    if is_binary {
        MarketCurve::Binary {
            p_over: stat.p_over.unwrap_or(0.5),
        }
    } else {
        MarketCurve::Continuous(MarketModel {
            mean: stat.mean,
            sigma,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::scale::{SharedScale, MARKET_MARGIN};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn stat(mean: f64, sigma: Option<f64>, threshold: f64) -> MarketStat {
        MarketStat {
            mean,
            sigma,
            q15: 0.0,
            q50: mean,
            q85: 0.0,
            threshold,
            p_over: None,
        }
    }

    // -- Classification --

    #[test]
    fn anytime_td_is_always_binary() {
        let s = MarketStat {
            p_over: Some(0.55),
            ..stat(0.4, Some(0.3), 0.0)
        };
        match classify(ANYTIME_TD_KEY, &s) {
            MarketCurve::Binary { p_over } => assert!(approx_eq(p_over, 0.55, 1e-12)),
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn binary_without_p_over_defaults_even() {
        let s = stat(0.4, None, 0.0);
        match classify(ANYTIME_TD_KEY, &s) {
            MarketCurve::Binary { p_over } => assert!(approx_eq(p_over, 0.5, 1e-12)),
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn missing_sigma_with_zero_threshold_stays_continuous() {
        // A missing sigma resolves to the finite epsilon, so the
        // threshold-0 clause alone does not flip a market to binary.
        let s = stat(62.5, None, 0.0);
        match classify("player_rush_yds", &s) {
            MarketCurve::Continuous(model) => {
                assert!(approx_eq(model.sigma, SIGMA_EPS, 1e-18));
            }
            other => panic!("expected Continuous, got {other:?}"),
        }
    }

    #[test]
    fn infinite_sigma_with_zero_threshold_is_binary() {
        let s = stat(0.0, Some(f64::INFINITY), 0.0);
        assert!(matches!(
            classify("player_receptions", &s),
            MarketCurve::Binary { .. }
        ));
    }

    #[test]
    fn normal_market_is_continuous() {
        let s = stat(245.0, Some(28.0), 239.5);
        match classify("player_pass_yds", &s) {
            MarketCurve::Continuous(model) => {
                assert!(approx_eq(model.mean, 245.0, 1e-12));
                assert!(approx_eq(model.sigma, 28.0, 1e-12));
            }
            other => panic!("expected Continuous, got {other:?}"),
        }
    }

    // -- Sigma resolution --

    #[test]
    fn zero_sigma_resolves_to_epsilon() {
        assert!(approx_eq(resolve_sigma(Some(0.0)), SIGMA_EPS, 1e-18));
        assert!(approx_eq(resolve_sigma(None), SIGMA_EPS, 1e-18));
        assert!(approx_eq(resolve_sigma(Some(f64::NAN)), SIGMA_EPS, 1e-18));
        assert!(approx_eq(resolve_sigma(Some(28.0)), 28.0, 1e-12));
    }

    // -- Density and curves --

    #[test]
    fn density_peaks_at_mean() {
        let model = MarketModel::new(245.0, 28.0);
        assert!(approx_eq(model.density_at(245.0), 1.0, 1e-12));
        // Symmetric: equal falloff either side.
        assert!(approx_eq(
            model.density_at(217.0),
            model.density_at(273.0),
            1e-12
        ));
    }

    #[test]
    fn density_one_sigma_out() {
        let model = MarketModel::new(100.0, 15.0);
        assert!(approx_eq(model.density_at(115.0), (-0.5_f64).exp(), 1e-12));
    }

    #[test]
    fn curve_on_market_scale_is_normalized() {
        let s = stat(245.0, Some(28.0), 239.5);
        let scale = SharedScale::for_markets(&[s], Some(239.5), &[], MARKET_MARGIN);
        let model = MarketModel::from_stat(&s);
        let curve = model.build_curve(&scale, 80);

        assert_eq!(curve.len(), 81);
        let max_y = curve.iter().map(|p| p.y).fold(0.0_f64, f64::max);
        assert!(approx_eq(max_y, 1.0, 1e-12));
    }

    #[test]
    fn two_models_on_one_scale_are_comparable() {
        // Multi-model overlay: both curves sampled over one shared domain.
        let a = stat(245.0, Some(28.0), 239.5);
        let b = stat(252.0, Some(22.0), 239.5);
        let scale = SharedScale::for_markets(&[a, b], Some(239.5), &[], MARKET_MARGIN);

        let curve_a = MarketModel::from_stat(&a).build_curve(&scale, 100);
        let curve_b = MarketModel::from_stat(&b).build_curve(&scale, 100);

        assert_eq!(curve_a.len(), curve_b.len());
        for (pa, pb) in curve_a.iter().zip(curve_b.iter()) {
            assert!(approx_eq(pa.x, pb.x, 1e-9), "x-domains must match");
        }
    }

    #[test]
    fn over_probability_via_range_query() {
        // P(X >= threshold) for a mean sitting above the book line should
        // exceed one half.
        let s = stat(245.0, Some(28.0), 239.5);
        let scale = SharedScale::for_markets(&[s], Some(239.5), &[], MARKET_MARGIN);
        let model = MarketModel::from_stat(&s);

        let over = model.range_probability(&scale, 239.5, scale.x_max);
        let under = model.range_probability(&scale, scale.x_min, 239.5);
        assert!(over > 0.5, "over probability was {over}");
        assert!(approx_eq(over + under, 1.0, 0.02));
    }
}
