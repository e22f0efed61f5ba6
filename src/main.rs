//! Headless tile-match runner (default binary).
//!
//! Loads a level set, replays a step script at the fixed tick and prints
//! engine events as JSON lines on stdout. Diagnostics go to stderr.

use std::fs;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};

use tile_match::cli::{parse_args, USAGE};
use tile_match::core::LevelSetConfig;
use tile_match::script::{parse_script, run_script};

const DEMO_LEVELS: &str = include_str!("../levels/demo.json");
const DEMO_SCRIPT: &str = include_str!("../levels/demo_script.json");

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let levels_json = match &config.levels {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read level set {}", path.display()))?,
        None => DEMO_LEVELS.to_string(),
    };
    let script_json = match &config.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => DEMO_SCRIPT.to_string(),
    };

    let level_set = LevelSetConfig::from_json_str(&levels_json).context("invalid level set")?;
    let mut cycle = level_set.build().context("invalid level set")?;
    let steps = parse_script(&script_json)?;

    eprintln!(
        "[tile-match] {} levels, starting at {} ({}), settle rate {}, {} steps",
        cycle.level_count(),
        cycle.active_index(),
        cycle.grid().name(),
        cycle.controller().settle_rate(),
        steps.len()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run_script(&mut cycle, &steps, config.max_ticks, &mut out)?;

    eprintln!(
        "[tile-match] done: {} ticks, {} swaps accepted, {} rejected, {} level advances",
        summary.ticks, summary.swaps_accepted, summary.swaps_rejected, summary.levels_advanced
    );
    if summary.settle_timeouts > 0 {
        eprintln!(
            "[tile-match] warning: {} settle steps hit the tick cap",
            summary.settle_timeouts
        );
    }

    Ok(())
}
