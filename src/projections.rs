// Projection payload loading and normalization.
//
// Parses saved `/projections` and `/player/odds` API payloads into typed
// records. Parsing is defensive: malformed rows are skipped with a warning,
// missing numeric fields default, and unknown keys are ignored. The rest of
// the crate never sees raw JSON.

use crate::lineup::slot::{Position, Target};
use crate::names;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One player's weekly fantasy-point projection trio.
///
/// `floor`/`mid`/`ceiling` approximate the 15th/50th/85th percentile
/// outcomes; `None` means the upstream odds coverage was missing for that
/// estimate.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProjection {
    pub name: String,
    pub pos: Position,
    pub floor: Option<f64>,
    pub mid: Option<f64>,
    pub ceiling: Option<f64>,
    /// True when the trio was derived without full market coverage.
    pub incomplete: bool,
}

impl PlayerProjection {
    /// The point estimate for an optimization target, if present and finite.
    pub fn target_value(&self, target: Target) -> Option<f64> {
        let v = match target {
            Target::Floor => self.floor,
            Target::Mid => self.mid,
            Target::Ceiling => self.ceiling,
        };
        v.filter(|x| x.is_finite())
    }

    /// Whether the row should be flagged incomplete. Forced when all three
    /// estimates are absent, regardless of the stored flag.
    pub fn effective_incomplete(&self) -> bool {
        self.incomplete
            || (self.floor.is_none() && self.mid.is_none() && self.ceiling.is_none())
    }
}

/// The `/projections` payload for one week.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionsPayload {
    pub week: Option<String>,
    pub players: Vec<PlayerProjection>,
}

/// Per-market summary statistics computed server-side; consumed read-only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarketStat {
    pub mean: f64,
    /// Absent when the market has no spread estimate.
    pub sigma: Option<f64>,
    pub q15: f64,
    pub q50: f64,
    pub q85: f64,
    pub threshold: f64,
    /// Normalized over probability for binary markets.
    pub p_over: Option<f64>,
}

/// The `/player/odds` payload: per-market stats plus summary fields.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerOddsPayload {
    pub markets: BTreeMap<String, MarketStat>,
    pub mean_stat: Option<f64>,
    pub avg_threshold: Option<f64>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

/// Raw `/projections` document. Players are kept as loose values so one
/// malformed row cannot fail the whole payload.
#[derive(Debug, Deserialize)]
struct RawProjections {
    #[serde(default)]
    week: Option<String>,
    #[serde(default)]
    players: Vec<serde_json::Value>,
    /// Absorb rate-limit and debug blocks the server includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    floor: Option<f64>,
    #[serde(default)]
    mid: Option<f64>,
    #[serde(default)]
    ceiling: Option<f64>,
    #[serde(default)]
    incomplete: Option<bool>,
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOdds {
    #[serde(default)]
    mean_stat: Option<f64>,
    /// Both sections may be absent or null in older payloads.
    #[serde(default)]
    summary: Option<RawSummary>,
    #[serde(default)]
    debug_math: Option<RawDebugMath>,
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    #[serde(default)]
    avg_threshold: Option<f64>,
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDebugMath {
    #[serde(default)]
    per_market: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawMarketStat {
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    sigma: Option<f64>,
    #[serde(default)]
    q15: Option<f64>,
    #[serde(default)]
    q50: Option<f64>,
    #[serde(default)]
    q85: Option<f64>,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    p_over_norm: Option<f64>,
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Drop non-finite values so NaN/Infinity never enter the core.
fn sanitize(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

fn player_from_raw(raw: RawPlayerRow) -> Option<PlayerProjection> {
    let name = names::strip_stat_label(raw.name.as_deref().unwrap_or(""));
    if name.is_empty() {
        warn!("skipping player row with empty name");
        return None;
    }

    let pos_str = raw.pos.unwrap_or_default();
    let Some(pos) = Position::from_str_pos(&pos_str) else {
        warn!("skipping player '{}': unknown position '{}'", name, pos_str);
        return None;
    };

    let floor = sanitize(raw.floor);
    let mid = sanitize(raw.mid);
    let ceiling = sanitize(raw.ceiling);
    let missing_all = floor.is_none() && mid.is_none() && ceiling.is_none();

    Some(PlayerProjection {
        name,
        pos,
        floor,
        mid,
        ceiling,
        incomplete: raw.incomplete.unwrap_or(false) || missing_all,
    })
}

fn market_stat_from_raw(raw: RawMarketStat) -> MarketStat {
    let mean = sanitize(raw.mean).unwrap_or(0.0);
    MarketStat {
        mean,
        sigma: raw.sigma,
        q15: sanitize(raw.q15).unwrap_or(0.0),
        q50: sanitize(raw.q50).unwrap_or(mean),
        q85: sanitize(raw.q85).unwrap_or(0.0),
        threshold: sanitize(raw.threshold).unwrap_or(0.0),
        p_over: raw.p_over_norm,
    }
}

// ---------------------------------------------------------------------------
// String-based parsers (private, enable testing without files)
// ---------------------------------------------------------------------------

fn parse_projections(text: &str) -> Result<ProjectionsPayload, serde_json::Error> {
    let raw: RawProjections = serde_json::from_str(text)?;

    let mut players = Vec::with_capacity(raw.players.len());
    for value in raw.players {
        match serde_json::from_value::<RawPlayerRow>(value) {
            Ok(row) => {
                if let Some(player) = player_from_raw(row) {
                    players.push(player);
                }
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }

    Ok(ProjectionsPayload {
        week: raw.week,
        players,
    })
}

fn parse_player_odds(text: &str) -> Result<PlayerOddsPayload, serde_json::Error> {
    let raw: RawOdds = serde_json::from_str(text)?;
    let summary = raw.summary.unwrap_or_default();
    let debug_math = raw.debug_math.unwrap_or_default();

    let mut markets = BTreeMap::new();
    for (key, value) in debug_math.per_market {
        match serde_json::from_value::<RawMarketStat>(value) {
            Ok(stat) => {
                markets.insert(key, market_stat_from_raw(stat));
            }
            Err(e) => {
                warn!("skipping malformed market stats for '{}': {}", key, e);
            }
        }
    }

    Ok(PlayerOddsPayload {
        markets,
        mean_stat: sanitize(raw.mean_stat),
        avg_threshold: sanitize(summary.avg_threshold),
    })
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load a saved `/projections` payload from a JSON file.
pub fn load_projections(path: &Path) -> Result<ProjectionsPayload, PayloadError> {
    let text = std::fs::read_to_string(path).map_err(|e| PayloadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_projections(&text).map_err(|e| PayloadError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load a saved `/player/odds` payload from a JSON file.
pub fn load_player_odds(path: &Path) -> Result<PlayerOddsPayload, PayloadError> {
    let text = std::fs::read_to_string(path).map_err(|e| PayloadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_player_odds(&text).map_err(|e| PayloadError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Projections payload --

    #[test]
    fn projections_basic_roundtrip() {
        let text = r#"{
            "week": "this",
            "players": [
                {"name": "Josh Allen", "pos": "QB", "floor": 14.1, "mid": 21.5, "ceiling": 29.8, "incomplete": false},
                {"name": "Bijan Robinson", "pos": "RB", "floor": 8.0, "mid": 13.2, "ceiling": 19.5, "incomplete": false}
            ]
        }"#;

        let payload = parse_projections(text).unwrap();
        assert_eq!(payload.week.as_deref(), Some("this"));
        assert_eq!(payload.players.len(), 2);

        let allen = &payload.players[0];
        assert_eq!(allen.name, "Josh Allen");
        assert_eq!(allen.pos, Position::Quarterback);
        assert_eq!(allen.mid, Some(21.5));
        assert!(!allen.incomplete);
    }

    #[test]
    fn projections_null_trio_forces_incomplete() {
        let text = r#"{
            "players": [
                {"name": "Mystery Man", "pos": "WR", "floor": null, "mid": null, "ceiling": null, "incomplete": false}
            ]
        }"#;

        let payload = parse_projections(text).unwrap();
        assert_eq!(payload.players.len(), 1);
        assert!(
            payload.players[0].incomplete,
            "incomplete must be forced when all three estimates are null"
        );
    }

    #[test]
    fn projections_missing_fields_default() {
        // No floor/ceiling keys at all, no incomplete flag.
        let text = r#"{
            "players": [
                {"name": "Partial Guy", "pos": "TE", "mid": 9.0}
            ]
        }"#;

        let payload = parse_projections(text).unwrap();
        let p = &payload.players[0];
        assert_eq!(p.floor, None);
        assert_eq!(p.mid, Some(9.0));
        assert_eq!(p.ceiling, None);
        assert!(!p.incomplete);
    }

    #[test]
    fn projections_unknown_position_skipped() {
        let text = r#"{
            "players": [
                {"name": "Kicker Ken", "pos": "K", "mid": 8.0},
                {"name": "Real WR", "pos": "WR", "mid": 11.0}
            ]
        }"#;

        let payload = parse_projections(text).unwrap();
        assert_eq!(payload.players.len(), 1);
        assert_eq!(payload.players[0].name, "Real WR");
    }

    #[test]
    fn projections_malformed_row_skipped() {
        let text = r#"{
            "players": [
                {"name": "Good Row", "pos": "RB", "mid": 12.0},
                {"name": "Bad Row", "pos": "RB", "mid": "not a number"},
                {"name": "Another Good", "pos": "RB", "mid": 7.5}
            ]
        }"#;

        let payload = parse_projections(text).unwrap();
        assert_eq!(payload.players.len(), 2);
        assert_eq!(payload.players[0].name, "Good Row");
        assert_eq!(payload.players[1].name, "Another Good");
    }

    #[test]
    fn projections_empty_name_skipped() {
        let text = r#"{"players": [{"name": "  ", "pos": "QB", "mid": 20.0}]}"#;
        let payload = parse_projections(text).unwrap();
        assert!(payload.players.is_empty());
    }

    #[test]
    fn projections_stat_label_stripped_from_name() {
        let text = r#"{"players": [{"name": "Patrick Mahomes Pass Yds", "pos": "QB", "mid": 22.0}]}"#;
        let payload = parse_projections(text).unwrap();
        assert_eq!(payload.players[0].name, "Patrick Mahomes");
    }

    #[test]
    fn projections_extra_keys_ignored() {
        let text = r#"{
            "week": "next",
            "ratelimit": "40/500",
            "ratelimit_info": {"used": 40},
            "players": [
                {"name": "Extra Fields", "pos": "TE", "mid": 6.0, "team": "KC", "alias": "ef"}
            ]
        }"#;

        let payload = parse_projections(text).unwrap();
        assert_eq!(payload.players.len(), 1);
    }

    #[test]
    fn projections_empty_players_ok() {
        let payload = parse_projections(r#"{"players": []}"#).unwrap();
        assert!(payload.players.is_empty());
        assert!(payload.week.is_none());
    }

    #[test]
    fn projections_invalid_document_is_error() {
        assert!(parse_projections("not json").is_err());
    }

    #[test]
    fn target_value_missing_is_none() {
        let p = PlayerProjection {
            name: "X".into(),
            pos: Position::WideReceiver,
            floor: None,
            mid: Some(10.0),
            ceiling: Some(f64::NAN),
            incomplete: false,
        };
        assert_eq!(p.target_value(Target::Floor), None);
        assert_eq!(p.target_value(Target::Mid), Some(10.0));
        // Non-finite values are treated as absent.
        assert_eq!(p.target_value(Target::Ceiling), None);
    }

    // -- Player odds payload --

    #[test]
    fn player_odds_per_market_parsed() {
        let text = r#"{
            "player": {"name": "Josh Allen"},
            "mean_stat": 245.0,
            "summary": {"avg_threshold": 239.5},
            "debug_math": {
                "per_market": {
                    "player_pass_yds": {"mean": 245.0, "sigma": 28.0, "q15": 216.0, "q50": 245.0, "q85": 274.0, "threshold": 239.5},
                    "player_anytime_td": {"mean": 0.4, "threshold": 0.0, "p_over_norm": 0.55}
                }
            }
        }"#;

        let payload = parse_player_odds(text).unwrap();
        assert_eq!(payload.mean_stat, Some(245.0));
        assert_eq!(payload.avg_threshold, Some(239.5));
        assert_eq!(payload.markets.len(), 2);

        let pass = &payload.markets["player_pass_yds"];
        assert_eq!(pass.mean, 245.0);
        assert_eq!(pass.sigma, Some(28.0));
        assert_eq!(pass.q85, 274.0);
        assert_eq!(pass.p_over, None);

        let td = &payload.markets["player_anytime_td"];
        assert_eq!(td.sigma, None);
        assert_eq!(td.threshold, 0.0);
        assert_eq!(td.p_over, Some(0.55));
    }

    #[test]
    fn player_odds_q50_falls_back_to_mean() {
        let text = r#"{
            "debug_math": {
                "per_market": {
                    "player_rush_yds": {"mean": 62.5}
                }
            }
        }"#;

        let payload = parse_player_odds(text).unwrap();
        let stat = &payload.markets["player_rush_yds"];
        assert_eq!(stat.q50, 62.5);
        assert_eq!(stat.q15, 0.0);
        assert_eq!(stat.threshold, 0.0);
    }

    #[test]
    fn player_odds_malformed_market_skipped() {
        let text = r#"{
            "debug_math": {
                "per_market": {
                    "player_receptions": {"mean": 5.5, "sigma": 1.4},
                    "player_broken": "oops"
                }
            }
        }"#;

        let payload = parse_player_odds(text).unwrap();
        assert_eq!(payload.markets.len(), 1);
        assert!(payload.markets.contains_key("player_receptions"));
    }

    #[test]
    fn player_odds_missing_sections_default() {
        let payload = parse_player_odds(r#"{}"#).unwrap();
        assert!(payload.markets.is_empty());
        assert!(payload.mean_stat.is_none());
        assert!(payload.avg_threshold.is_none());
    }
}
