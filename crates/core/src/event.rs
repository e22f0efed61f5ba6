//! Grid events, recorded by the engine and drained by observers.

use serde::Serialize;

use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    SwapAccepted { from: Coord, to: Coord },
    MatchesFound { count: usize },
    MatchesCleared { count: usize },
    CollapseSettled,
    LevelComplete,
    LevelAdvanced { from: usize, to: usize },
}

/// A grid event tagged with the level it happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleEvent {
    pub level: usize,
    #[serde(flatten)]
    pub event: GridEvent,
}
