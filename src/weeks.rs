// Weekly slate windows.
//
// A slate runs Thursday 00:00 UTC through Monday 23:59:59 UTC. The current
// window stays "this week" through Monday night and flips to the next
// Thursday on Tuesday morning, so lineups keep pointing at the games just
// played until the week is truly over.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike, Utc};

/// An inclusive UTC window over one Thursday-to-Monday slate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    /// Whether an instant falls inside the window, inclusive at both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether a kickoff timestamp string falls inside the window.
    ///
    /// Accepts the odds feed's `2025-09-07T17:00:00Z` form as well as any
    /// RFC 3339 timestamp. Unparseable strings are treated as outside.
    pub fn contains_kickoff(&self, ts: &str) -> bool {
        match parse_kickoff(ts) {
            Some(instant) => self.contains(instant),
            None => false,
        }
    }
}

/// Midnight (00:00:00) on the given instant's date.
fn day_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_hour(0)
        .and_then(|d| d.with_minute(0))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(instant)
}

/// The most recent occurrence of `weekday` (Mon=0..Sun=6) at 00:00, on or
/// before the given instant's date.
fn prev_weekday(instant: DateTime<Utc>, weekday: u32) -> DateTime<Utc> {
    let base = day_start(instant);
    let delta = (base.weekday().num_days_from_monday() + 7 - weekday) % 7;
    base - Duration::days(delta as i64)
}

/// Thursday anchor and Thursday index in Mon=0 numbering.
const THURSDAY: u32 = 3;

/// Window length: Thursday 00:00 plus 4 days, 23:59:59 lands on Monday
/// night.
fn window_from_thursday(thursday: DateTime<Utc>) -> WeekWindow {
    WeekWindow {
        start: thursday,
        end: thursday + Duration::days(4) + Duration::hours(23) + Duration::minutes(59)
            + Duration::seconds(59),
    }
}

/// Compute the ("this week", "next week") slate windows for an instant.
pub fn week_windows(now: DateTime<Utc>) -> (WeekWindow, WeekWindow) {
    let prev_thu = prev_weekday(now, THURSDAY);
    let prev_window = window_from_thursday(prev_thu);

    // Still inside (or before the end of) the current Thu->Mon cycle:
    // that cycle is "this week". From Tuesday onward, advance.
    let this_thu = if now <= prev_window.end {
        prev_thu
    } else {
        prev_thu + Duration::days(7)
    };

    let this_window = window_from_thursday(this_thu);
    let next_window = window_from_thursday(this_thu + Duration::days(7));
    (this_window, next_window)
}

/// Parse a kickoff timestamp from the odds feed.
fn parse_kickoff(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%SZ") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
