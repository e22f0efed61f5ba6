//! Config module - JSON level sets
//!
//! A level set bundles the authored layouts of every level together with the
//! tunables of the tick loop. Everything except `levels` has a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cycle::{CycleError, LevelCycle};
use crate::grid::Grid;
use crate::layout::{AuthoredLayout, LayoutError};
use crate::rng::SimpleRng;
use crate::swap::SwapController;
use crate::types::{DEFAULT_DESTROY_ANIMATION_MS, DEFAULT_SETTLE_RATE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid level set JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level {index}: {source}")]
    Layout {
        index: usize,
        #[source]
        source: LayoutError,
    },
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error("settle_rate must be a positive number, got {0}")]
    SettleRate(f32),
}

fn default_seed() -> u32 {
    1
}

fn default_settle_rate() -> f32 {
    DEFAULT_SETTLE_RATE
}

fn default_destroy_animation_ms() -> u32 {
    DEFAULT_DESTROY_ANIMATION_MS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSetConfig {
    #[serde(default)]
    pub start_index: usize,
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default = "default_settle_rate")]
    pub settle_rate: f32,
    #[serde(default = "default_destroy_animation_ms")]
    pub destroy_animation_ms: u32,
    pub levels: Vec<AuthoredLayout>,
}

impl LevelSetConfig {
    pub fn new(levels: Vec<AuthoredLayout>) -> Self {
        Self {
            start_index: 0,
            seed: default_seed(),
            settle_rate: default_settle_rate(),
            destroy_animation_ms: default_destroy_animation_ms(),
            levels,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Validate every layout and assemble the cycle
    pub fn build(&self) -> Result<LevelCycle, ConfigError> {
        if !(self.settle_rate > 0.0) {
            return Err(ConfigError::SettleRate(self.settle_rate));
        }

        let grids = self
            .levels
            .iter()
            .enumerate()
            .map(|(index, layout)| {
                Grid::from_layout(layout, self.destroy_animation_ms)
                    .map_err(|source| ConfigError::Layout { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cycle = LevelCycle::with_controller(
            grids,
            self.start_index,
            SwapController::with_settle_rate(self.settle_rate),
            SimpleRng::new(self.seed),
        )?;
        Ok(cycle)
    }
}
