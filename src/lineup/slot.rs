// Position, slot and optimization-target types for lineup assembly.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Football positions carried by projection rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
}

/// All positions in bucket/display order.
pub const ALL_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];

impl Position {
    /// Parse a position string into a Position enum.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
        }
    }

    /// Whether this position can occupy the FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(
            self,
            Position::RunningBack | Position::WideReceiver | Position::TightEnd
        )
    }

    /// Stable bucket index (QB=0, RB=1, WR=2, TE=3).
    pub fn index(&self) -> usize {
        match self {
            Position::Quarterback => 0,
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::TightEnd => 3,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// The roster slot a lineup row occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "FLEX")]
    Flex,
    #[serde(rename = "BENCH")]
    Bench,
}

impl SlotKind {
    pub fn display_str(&self) -> &'static str {
        match self {
            SlotKind::Quarterback => "QB",
            SlotKind::RunningBack => "RB",
            SlotKind::WideReceiver => "WR",
            SlotKind::TightEnd => "TE",
            SlotKind::Flex => "FLEX",
            SlotKind::Bench => "BENCH",
        }
    }

    /// Whether rows in this slot count toward the lineup total.
    pub fn counts_toward_total(&self) -> bool {
        !matches!(self, SlotKind::Bench)
    }

    /// The dedicated slot for a position (never FLEX or BENCH).
    pub fn for_position(pos: Position) -> Self {
        match pos {
            Position::Quarterback => SlotKind::Quarterback,
            Position::RunningBack => SlotKind::RunningBack,
            Position::WideReceiver => SlotKind::WideReceiver,
            Position::TightEnd => SlotKind::TightEnd,
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Optimization target
// ---------------------------------------------------------------------------

/// Which point estimate the allocator maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Floor,
    Mid,
    Ceiling,
}

/// All targets in display order.
pub const ALL_TARGETS: &[Target] = &[Target::Floor, Target::Mid, Target::Ceiling];

impl Target {
    pub fn from_str_target(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "floor" => Some(Target::Floor),
            "mid" => Some(Target::Mid),
            "ceiling" => Some(Target::Ceiling),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Target::Floor => "floor",
            Target::Mid => "mid",
            Target::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
