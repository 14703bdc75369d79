// Lineup assistant entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the projections snapshot
// 4. Resolve the active slate window
// 5. Allocate lineups for all three targets and print them
// 6. Print per-starter range probabilities on the shared axis

use lineup_assistant::config;
use lineup_assistant::curve::scale::SharedScale;
use lineup_assistant::curve::split::SplitGaussian;
use lineup_assistant::curve::Density;
use lineup_assistant::lineup::allocator::{allocate, LineupResult};
use lineup_assistant::lineup::slot::{Target, ALL_TARGETS};
use lineup_assistant::projections;
use lineup_assistant::weeks;

use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Lineup assistant starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: season={}, week={}, snapshot={}",
        config.projection.season, config.projection.week, config.projection.snapshot
    );

    // 3. Load the projections snapshot
    let payload = projections::load_projections(Path::new(&config.projection.snapshot))
        .context("failed to load projections snapshot")?;
    info!(
        "Loaded {} players (payload week: {})",
        payload.players.len(),
        payload.week.as_deref().unwrap_or("unknown")
    );

    // 4. Resolve the active slate window
    let (this_week, next_week) = weeks::week_windows(Utc::now());
    let window = if config.projection.week == "next" {
        next_week
    } else {
        this_week
    };
    info!(
        "Active slate: {} -> {}",
        window.start.format("%Y-%m-%d %H:%M UTC"),
        window.end.format("%Y-%m-%d %H:%M UTC")
    );

    println!(
        "Season {} / {} week slate ({} – {})",
        config.projection.season,
        config.projection.week,
        window.start.format("%a %b %e"),
        window.end.format("%a %b %e"),
    );

    // 5. Lineups for all three targets
    for &target in ALL_TARGETS {
        let result = allocate(&payload.players, target);
        print_lineup(&result);
    }

    // 6. Per-starter range probabilities for the mid lineup, all on one
    // shared fantasy-point axis so the curves are comparable.
    let scale = SharedScale::from_players(&payload.players);
    let mid = allocate(&payload.players, Target::Mid);
    println!("\nChance of landing between floor and ceiling (shared axis 0–{:.1}):", scale.x_max);
    for row in mid.starters() {
        let (Some(f), Some(c)) = (row.floor, row.ceiling) else {
            println!("  {:<24} incomplete odds, no curve", row.name);
            continue;
        };
        let density = SplitGaussian::from_optional_trio(row.floor, row.mid, row.ceiling);
        let p = density.range_probability(&scale, f, c);
        println!("  {:<24} {:>5.1}%  ({:.2}–{:.2} pts)", row.name, p * 100.0, f, c);
    }

    info!("Lineup assistant finished");
    Ok(())
}

/// Print one allocated lineup as a fixed-width table.
fn print_lineup(result: &LineupResult) {
    println!(
        "\n{} lineup - projected {:.2} pts",
        result.target.display_str().to_uppercase(),
        result.total_points
    );
    println!(
        "  {:<6} {:<24} {:<4} {:>8} {:>8} {:>8}",
        "Slot", "Name", "Pos", "Floor", "Mid", "Ceiling"
    );
    for row in &result.lineup {
        let fmt = |v: Option<f64>| match v {
            Some(x) if !row.incomplete => format!("{x:.2}"),
            _ => "-".to_string(),
        };
        println!(
            "  {:<6} {:<24} {:<4} {:>8} {:>8} {:>8}{}",
            row.slot.display_str(),
            row.name,
            row.pos.display_str(),
            fmt(row.floor),
            fmt(row.mid),
            fmt(row.ceiling),
            if row.incomplete { "  [incomplete]" } else { "" },
        );
    }
}

/// Initialize tracing to log to a file (keeps stdout clean for the tables).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("startsit.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lineup_assistant=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
