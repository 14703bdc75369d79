// Shared x-axis scales for curve rendering.
//
// Curves drawn for visual comparison must share one x-domain, or relative
// comparisons are meaningless. The scale is an explicit value computed once
// by the caller and passed into every curve-building call; nothing here is
// global or mutable.

use serde::Serialize;

use crate::projections::{MarketStat, PlayerProjection};

/// Default multiplicative margin applied above the largest market marker.
pub const MARKET_MARGIN: f64 = 1.2;

/// An inclusive x-axis range shared by a set of curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SharedScale {
    pub x_min: f64,
    pub x_max: f64,
}

impl SharedScale {
    /// Build a scale, widening degenerate ranges to a unit span.
    pub fn new(x_min: f64, x_max: f64) -> Self {
        let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
        SharedScale { x_min, x_max }
    }

    /// The fantasy-point axis shared by every player curve in a view:
    /// `[0, max ceiling]` across the pool, with a minimum span of 1.
    pub fn from_players(players: &[PlayerProjection]) -> Self {
        let mut g_max = 0.0_f64;
        for p in players {
            if let Some(c) = p.ceiling {
                if c.is_finite() && c > g_max {
                    g_max = c;
                }
            }
        }
        if !(g_max > 0.0) {
            g_max = 1.0;
        }
        SharedScale {
            x_min: 0.0,
            x_max: g_max,
        }
    }

    /// Fallback axis for a single floor/mid/ceiling curve when no pool-wide
    /// scale is available: `[0, max(c, m) + |c - m| / 2]`.
    pub fn for_trio(_floor: f64, mid: f64, ceiling: f64) -> Self {
        let x_max = ceiling.max(mid) + (ceiling - mid).abs() * 0.5;
        SharedScale::new(0.0, x_max)
    }

    /// Axis for one or more market-stat curves drawn together. Dominates
    /// every model's mean and q85, the summary threshold and all book
    /// lines, floored at 1 and widened by `margin` (1.2 in the UI).
    pub fn for_markets(
        models: &[MarketStat],
        threshold: Option<f64>,
        book_lines: &[f64],
        margin: f64,
    ) -> Self {
        let mut x_max = 0.0_f64;
        for m in models {
            x_max = x_max.max(m.mean).max(m.q85);
        }
        if let Some(t) = threshold {
            x_max = x_max.max(t);
        }
        for &line in book_lines {
            if line.is_finite() {
                x_max = x_max.max(line);
            }
        }
        if !(x_max > 0.0) {
            x_max = 1.0;
        }
        SharedScale {
            x_min: 0.0,
            x_max: x_max * margin,
        }
    }

    pub fn span(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Clamp a query point into the axis.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.x_min, self.x_max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
