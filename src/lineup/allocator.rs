// Greedy positional slot allocation.
//
// Builds a legal starting lineup (1 QB, 2 RB, 2 WR, 1 TE, 1 FLEX, rest
// bench) from an unordered projection pool, maximizing one target estimate
// position-by-position. Greedy by design: each bucket is filled from its own
// descending order, then FLEX takes the best leftover RB/WR/TE. A shortfall
// at a position yields fewer filled slots, never an error.

use std::collections::HashSet;

use serde::Serialize;

use crate::lineup::slot::{Position, SlotKind, Target};
use crate::names::dedup_key;
use crate::projections::PlayerProjection;

// ---------------------------------------------------------------------------
// Slot requirements
// ---------------------------------------------------------------------------

/// Starter slots per position (FLEX handled separately).
pub const QB_SLOTS: usize = 1;
pub const RB_SLOTS: usize = 2;
pub const WR_SLOTS: usize = 2;
pub const TE_SLOTS: usize = 1;
pub const FLEX_SLOTS: usize = 1;

/// FLEX candidates are gathered in this order before the stable sort, so
/// equal-value leftovers resolve the same way on every call.
const FLEX_ORDER: &[Position] = &[
    Position::WideReceiver,
    Position::RunningBack,
    Position::TightEnd,
];

/// Bench leftovers are gathered in this order before the stable sort.
const BENCH_ORDER: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One row of an allocated lineup. Constructed fresh on every allocation
/// call; the input pool is never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct LineupSlot {
    pub slot: SlotKind,
    pub name: String,
    pub pos: Position,
    pub floor: Option<f64>,
    pub mid: Option<f64>,
    pub ceiling: Option<f64>,
    pub incomplete: bool,
}

/// A full allocated lineup: starters + FLEX first, then bench.
#[derive(Debug, Clone, Serialize)]
pub struct LineupResult {
    pub target: Target,
    pub lineup: Vec<LineupSlot>,
    /// Sum of the target estimate over non-bench rows, nulls as 0, rounded
    /// to 2 decimals.
    pub total_points: f64,
}

impl LineupResult {
    /// Starter + FLEX rows (everything that counts toward the total).
    pub fn starters(&self) -> impl Iterator<Item = &LineupSlot> {
        self.lineup.iter().filter(|r| r.slot.counts_toward_total())
    }

    /// Bench rows.
    pub fn bench(&self) -> impl Iterator<Item = &LineupSlot> {
        self.lineup.iter().filter(|r| !r.slot.counts_toward_total())
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Target value used for sorting and totals: missing estimates count as 0.
fn sort_value(p: &PlayerProjection, target: Target) -> f64 {
    p.target_value(target).unwrap_or(0.0)
}

/// Stable descending sort by the target estimate. Ties keep pool order.
fn sort_desc(list: &mut [&PlayerProjection], target: Target) {
    list.sort_by(|a, b| {
        sort_value(b, target)
            .partial_cmp(&sort_value(a, target))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Take up to `n` players from a sorted bucket, skipping names already
/// seated (normalized key comparison, so formatting variants of one player
/// cannot occupy two slots).
fn take<'a>(
    bucket: &[&'a PlayerProjection],
    n: usize,
    used: &mut HashSet<String>,
) -> Vec<&'a PlayerProjection> {
    let mut out = Vec::new();
    for p in bucket {
        let key = dedup_key(&p.name);
        if used.contains(&key) {
            continue;
        }
        used.insert(key);
        out.push(*p);
        if out.len() == n {
            break;
        }
    }
    out
}

/// Allocate a starting lineup from `players`, maximizing `target`.
///
/// Row order: QB, RB, RB, WR, WR, TE, FLEX, then bench sorted descending.
/// Null estimates sort and total as 0. Never fails: empty or short pools
/// just produce fewer rows.
pub fn allocate(players: &[PlayerProjection], target: Target) -> LineupResult {
    // 1. Bucket by position, preserving pool order within each bucket.
    let mut buckets: [Vec<&PlayerProjection>; 4] = Default::default();
    for p in players {
        buckets[p.pos.index()].push(p);
    }

    // 2. Sort each bucket descending by the target estimate.
    for bucket in &mut buckets {
        sort_desc(bucket, target);
    }

    // 3. Fill dedicated slots greedily.
    let mut used: HashSet<String> = HashSet::new();
    let qb = take(&buckets[Position::Quarterback.index()], QB_SLOTS, &mut used);
    let rb = take(&buckets[Position::RunningBack.index()], RB_SLOTS, &mut used);
    let wr = take(&buckets[Position::WideReceiver.index()], WR_SLOTS, &mut used);
    let te = take(&buckets[Position::TightEnd.index()], TE_SLOTS, &mut used);

    // 4. FLEX: best remaining flex-eligible player.
    let mut flex_pool: Vec<&PlayerProjection> = Vec::new();
    for &pos in FLEX_ORDER {
        for &p in &buckets[pos.index()] {
            if !used.contains(&dedup_key(&p.name)) {
                flex_pool.push(p);
            }
        }
    }
    sort_desc(&mut flex_pool, target);
    let flex = take(&flex_pool, FLEX_SLOTS, &mut used);

    // 5. Assemble rows and total.
    let mut rows: Vec<LineupSlot> = Vec::new();
    let mut total = 0.0;

    let mut add = |slot: SlotKind, p: &PlayerProjection, total: &mut f64| {
        if slot.counts_toward_total() {
            *total += sort_value(p, target);
        }
        rows.push(LineupSlot {
            slot,
            name: p.name.clone(),
            pos: p.pos,
            floor: p.floor,
            mid: p.mid,
            ceiling: p.ceiling,
            incomplete: p.effective_incomplete(),
        });
    };

    for p in &qb {
        add(SlotKind::Quarterback, p, &mut total);
    }
    for p in &rb {
        add(SlotKind::RunningBack, p, &mut total);
    }
    for p in &wr {
        add(SlotKind::WideReceiver, p, &mut total);
    }
    for p in &te {
        add(SlotKind::TightEnd, p, &mut total);
    }
    for p in &flex {
        add(SlotKind::Flex, p, &mut total);
    }

    // 6. Bench: every remaining player, descending by target. Bench rows do
    // not consume dedup keys, so a leftover sharing a seated player's name
    // is dropped rather than listed twice.
    let mut bench: Vec<&PlayerProjection> = Vec::new();
    for &pos in BENCH_ORDER {
        for &p in &buckets[pos.index()] {
            if !used.contains(&dedup_key(&p.name)) {
                bench.push(p);
            }
        }
    }
    sort_desc(&mut bench, target);
    for p in &bench {
        add(SlotKind::Bench, p, &mut total);
    }

    LineupResult {
        target,
        lineup: rows,
        total_points: (total * 100.0).round() / 100.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
