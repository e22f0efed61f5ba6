//! Swap module - swap validation/execution and position settling
//!
//! A swap request is either applied whole or ignored: rejected requests leave
//! the grid untouched, just like a gesture the game chose not to react to.

use crate::event::GridEvent;
use crate::grid::Grid;
use crate::types::{Coord, SwapRequest, DEFAULT_SETTLE_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    Collapsing,
    NotNormalized,
    OutOfBounds,
    NotAdjacent,
    ElementsMoving,
    EmptySource,
    EmptyAbove,
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::Collapsing | SwapRejection::NotNormalized => "grid_busy",
            SwapRejection::ElementsMoving => "elements_moving",
            SwapRejection::OutOfBounds | SwapRejection::NotAdjacent => "invalid_cells",
            SwapRejection::EmptySource | SwapRejection::EmptyAbove => "invalid_content",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::Collapsing => "grid is collapsing",
            SwapRejection::NotNormalized => "grid is not normalized",
            SwapRejection::OutOfBounds => "cell outside the grid",
            SwapRejection::NotAdjacent => "cells are not orthogonal neighbours",
            SwapRejection::ElementsMoving => "elements are still moving",
            SwapRejection::EmptySource => "source cell is empty",
            SwapRejection::EmptyAbove => "cannot lift an empty cell from above",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapController {
    /// Interpolation factor per second while settling
    settle_rate: f32,
}

impl SwapController {
    pub fn new() -> Self {
        Self::with_settle_rate(DEFAULT_SETTLE_RATE)
    }

    pub fn with_settle_rate(settle_rate: f32) -> Self {
        Self { settle_rate }
    }

    pub fn settle_rate(&self) -> f32 {
        self.settle_rate
    }

    /// Check whether `from -> to` would be accepted right now
    pub fn validate_swap(&self, grid: &Grid, from: Coord, to: Coord) -> Result<(), SwapRejection> {
        if grid.is_collapsing() {
            return Err(SwapRejection::Collapsing);
        }
        if !grid.is_normalized() {
            return Err(SwapRejection::NotNormalized);
        }
        let (Some(source), Some(target)) = (grid.element(from), grid.element(to)) else {
            return Err(SwapRejection::OutOfBounds);
        };
        if !grid.neighbors(from).contains(&to) {
            return Err(SwapRejection::NotAdjacent);
        }
        if grid.has_moving_elements() {
            return Err(SwapRejection::ElementsMoving);
        }
        if source.is_empty() {
            return Err(SwapRejection::EmptySource);
        }
        // Only the exact "empty slot directly above" geometry is blocked.
        if target.is_empty() && to.y == from.y + 1 {
            return Err(SwapRejection::EmptyAbove);
        }
        Ok(())
    }

    /// Apply a swap if valid. Returns whether it took effect.
    pub fn request_swap(&self, grid: &mut Grid, from: Coord, to: Coord) -> bool {
        if self.validate_swap(grid, from, to).is_err() {
            return false;
        }
        let (Some(a), Some(b)) = (grid.index(from), grid.index(to)) else {
            return false;
        };
        grid.swap_with_motion(a, b);
        grid.push_event(GridEvent::SwapAccepted { from, to });
        true
    }

    pub fn apply(&self, grid: &mut Grid, request: SwapRequest) -> bool {
        self.request_swap(grid, request.from, request.to)
    }

    /// Move every travelling element toward its cell center.
    ///
    /// Returns true if at least one element landed this tick, in which case
    /// the grid is marked for another collapse + match pass.
    pub fn settle(&self, grid: &mut Grid, elapsed_ms: u32) -> bool {
        let rate = elapsed_ms as f32 / 1000.0 * self.settle_rate;
        let origin = grid.origin();
        let mut landed = false;

        for cell in grid.cells_mut() {
            let target = cell.coord().center(origin);
            let element = &mut cell.element;
            if !element.is_moving || element.is_settled {
                continue;
            }

            let arrived = match element.visual.as_mut() {
                Some(visual) => visual.move_toward(target, rate),
                None => true,
            };
            if arrived {
                element.land();
                landed = true;
            }
        }

        if landed {
            grid.invalidate_after_landing();
        }
        landed
    }
}

impl Default for SwapController {
    fn default() -> Self {
        Self::new()
    }
}
