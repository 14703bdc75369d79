// Player name normalization.
//
// Upstream feeds disagree on formatting ("Odell Beckham Jr." vs
// "odell beckham"), and some rows arrive with a stat label glued onto the
// name ("Patrick Mahomes Pass Yds"). These helpers produce the canonical
// forms used for deduplication and cross-payload joins.

/// Generational suffixes dropped from dedup keys.
const NAME_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v"];

/// Stat labels that can trail a player name in odds-derived rows.
const STAT_LABELS: &[&str] = &[
    "Any TD",
    "Pass Yds",
    "Pass TDs",
    "INTs",
    "Rush Yds",
    "Rec",
    "Rec Yds",
];

/// Build the normalized key used to deduplicate players across payloads.
///
/// Lowercases, turns common name punctuation into spaces, drops everything
/// else non-alphanumeric, strips generational suffix tokens, and removes
/// whitespace. "Odell Beckham Jr." and "odell beckham" map to the same key.
pub fn dedup_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        match ch {
            '.' | '\'' | '`' | '-' => cleaned.push(' '),
            c if c.is_ascii_alphanumeric() || c == ' ' => cleaned.push(c),
            _ => {}
        }
    }
    cleaned
        .split_whitespace()
        .filter(|token| !NAME_SUFFIXES.contains(token))
        .collect()
}

/// Strip a trailing stat label from a player name.
///
/// Returns the name truncated at the earliest ` <label>` occurrence, after
/// scrubbing interpunct and stray encoding artifacts. Names without a label
/// come back trimmed with whitespace collapsed.
pub fn strip_stat_label(name: &str) -> String {
    let scrubbed: String = name
        .chars()
        .map(|c| match c {
            '\u{00B7}' | '\u{2022}' | '\u{2219}' => ' ',
            '\u{00C2}' => ' ',
            other => other,
        })
        .collect();

    let mut cut = scrubbed.len();
    for label in STAT_LABELS {
        let needle = format!(" {label}");
        if let Some(pos) = scrubbed.find(&needle) {
            if pos > 0 && pos < cut {
                cut = pos;
            }
        }
    }

    scrubbed[..cut].split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
