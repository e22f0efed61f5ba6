//! Headless script runner.
//!
//! A script is a JSON array of steps replayed against a [`LevelCycle`] at a
//! fixed tick. Every drained [`CycleEvent`] is written as one JSON line, so a
//! run can be diffed or piped into other tools.

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{CycleEvent, CycleSnapshot, LevelCycle};
use crate::input::SwipeQuantizer;
use crate::types::{Coord, SwapRequest, Vec2, TICK_MS};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Request a swap between two cells
    Swap { from: Coord, to: Coord },
    /// Quantize a world-space swipe and request the resulting swap
    Swipe { start: Vec2, end: Vec2 },
    /// Tick a fixed number of times
    Ticks(u32),
    /// Tick until the active level accepts input, up to an optional cap
    Settle(Option<u32>),
}

pub fn parse_script(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).context("invalid script")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub swaps_accepted: u32,
    pub swaps_rejected: u32,
    pub levels_advanced: u32,
    /// Settle steps that hit their tick cap
    pub settle_timeouts: u32,
}

#[derive(Serialize)]
struct EventLine<'a> {
    tick: u64,
    #[serde(flatten)]
    event: &'a CycleEvent,
}

#[derive(Serialize)]
struct RejectLine {
    tick: u64,
    level: usize,
    event: &'static str,
    from: Coord,
    to: Coord,
    code: &'static str,
    reason: &'static str,
}

#[derive(Serialize)]
struct IgnoredSwipeLine {
    tick: u64,
    level: usize,
    event: &'static str,
    start: Vec2,
    end: Vec2,
}

struct Runner<'a, W: Write> {
    cycle: &'a mut LevelCycle,
    out: &'a mut W,
    max_ticks: u32,
    summary: RunSummary,
    snapshot: CycleSnapshot,
}

impl<'a, W: Write> Runner<'a, W> {
    fn tick(&mut self) -> Result<()> {
        if self.cycle.tick(TICK_MS) {
            self.summary.levels_advanced += 1;
        }
        self.summary.ticks += 1;
        self.flush_events()
    }

    fn flush_events(&mut self) -> Result<()> {
        let tick = self.cycle.tick_count();
        for event in &self.cycle.take_events() {
            let line = EventLine { tick, event };
            serde_json::to_writer(&mut *self.out, &line)?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn swap(&mut self, request: SwapRequest) -> Result<()> {
        if let Err(rejection) = self.cycle.validate_swap(request.from, request.to) {
            self.summary.swaps_rejected += 1;
            let line = RejectLine {
                tick: self.cycle.tick_count(),
                level: self.cycle.active_index(),
                event: "swap_rejected",
                from: request.from,
                to: request.to,
                code: rejection.code(),
                reason: rejection.message(),
            };
            serde_json::to_writer(&mut *self.out, &line)?;
            self.out.write_all(b"\n")?;
            return Ok(());
        }

        let accepted = self.cycle.apply(request);
        debug_assert!(accepted, "validated swap was not applied");
        self.summary.swaps_accepted += 1;
        self.flush_events()
    }

    fn swipe(&mut self, start: Vec2, end: Vec2) -> Result<()> {
        let quantizer = SwipeQuantizer::new(self.cycle.grid().origin());
        match quantizer.quantize(start, end) {
            Some(request) => self.swap(request),
            None => {
                let line = IgnoredSwipeLine {
                    tick: self.cycle.tick_count(),
                    level: self.cycle.active_index(),
                    event: "swipe_ignored",
                    start,
                    end,
                };
                serde_json::to_writer(&mut *self.out, &line)?;
                self.out.write_all(b"\n")?;
                Ok(())
            }
        }
    }

    fn settle(&mut self, cap: Option<u32>) -> Result<()> {
        let cap = cap.unwrap_or(self.max_ticks);
        for _ in 0..cap {
            if self.is_at_rest() {
                return Ok(());
            }
            self.tick()?;
        }
        if !self.is_at_rest() {
            self.summary.settle_timeouts += 1;
            eprintln!("[tile-match] settle: still busy after {} ticks", cap);
        }
        Ok(())
    }

    /// Playable and not about to leave the level
    fn is_at_rest(&mut self) -> bool {
        self.cycle.snapshot_into(&mut self.snapshot);
        self.snapshot.grid.playable() && !self.snapshot.grid.complete
    }
}

/// Replay `steps` against `cycle`, writing event lines and a final snapshot
/// line to `out`.
pub fn run_script<W: Write>(
    cycle: &mut LevelCycle,
    steps: &[Step],
    max_ticks: u32,
    out: &mut W,
) -> Result<RunSummary> {
    let mut runner = Runner {
        cycle,
        out,
        max_ticks,
        summary: RunSummary::default(),
        snapshot: CycleSnapshot::default(),
    };

    for step in steps {
        match *step {
            Step::Swap { from, to } => runner.swap(SwapRequest::new(from, to))?,
            Step::Swipe { start, end } => runner.swipe(start, end)?,
            Step::Ticks(n) => {
                for _ in 0..n {
                    runner.tick()?;
                }
            }
            Step::Settle(cap) => runner.settle(cap)?,
        }
    }

    runner.cycle.snapshot_into(&mut runner.snapshot);
    serde_json::to_writer(&mut *runner.out, &runner.snapshot)?;
    runner.out.write_all(b"\n")?;
    runner.out.flush()?;

    Ok(runner.summary)
}
