//! Level cycle - the fixed set of grids and the per-tick driver
//!
//! Only the active grid is ticked. When it reports completion and has come
//! to rest, it is restored to its authored layout and play moves on to the
//! next grid, wrapping around after the last one.

use std::collections::VecDeque;

use thiserror::Error;

use crate::event::{CycleEvent, GridEvent};
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snapshot::CycleSnapshot;
use crate::swap::{SwapController, SwapRejection};
use crate::types::{Coord, SwapRequest};

/// Undrained events kept by a cycle; older ones are dropped first
pub const EVENT_LOG_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("a level cycle needs at least one grid")]
    NoLevels,
    #[error("start index {index} is out of range for {count} levels")]
    StartOutOfRange { index: usize, count: usize },
}

#[derive(Debug, Clone)]
pub struct LevelCycle {
    grids: Vec<Grid>,
    active: usize,
    controller: SwapController,
    rng: SimpleRng,
    /// Monotonic tick counter
    tick: u64,
    events: VecDeque<CycleEvent>,
}

fn record(log: &mut VecDeque<CycleEvent>, level: usize, event: GridEvent) {
    if log.len() == EVENT_LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(CycleEvent { level, event });
}

impl LevelCycle {
    pub fn new(grids: Vec<Grid>, start: usize) -> Result<Self, CycleError> {
        Self::with_controller(grids, start, SwapController::new(), SimpleRng::default())
    }

    pub fn with_controller(
        mut grids: Vec<Grid>,
        start: usize,
        controller: SwapController,
        mut rng: SimpleRng,
    ) -> Result<Self, CycleError> {
        if grids.is_empty() {
            return Err(CycleError::NoLevels);
        }
        if start >= grids.len() {
            return Err(CycleError::StartOutOfRange {
                index: start,
                count: grids.len(),
            });
        }

        for (i, grid) in grids.iter_mut().enumerate() {
            grid.set_active(i == start);
        }
        grids[start].reset_animations(&mut rng);

        Ok(Self {
            grids,
            active: start,
            controller,
            rng,
            tick: 0,
            events: VecDeque::new(),
        })
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn level_count(&self) -> usize {
        self.grids.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn controller(&self) -> &SwapController {
        &self.controller
    }

    pub fn grid(&self) -> &Grid {
        &self.grids[self.active]
    }

    /// Mutable access for renderer hooks such as [`Grid::finish_destroy_at`]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.active]
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn request_swap(&mut self, from: Coord, to: Coord) -> bool {
        let grid = &mut self.grids[self.active];
        let accepted = self.controller.request_swap(grid, from, to);
        self.collect_events();
        accepted
    }

    pub fn apply(&mut self, request: SwapRequest) -> bool {
        self.request_swap(request.from, request.to)
    }

    pub fn validate_swap(&self, from: Coord, to: Coord) -> Result<(), SwapRejection> {
        self.controller.validate_swap(self.grid(), from, to)
    }

    /// Run one fixed-order tick on the active grid.
    ///
    /// Returns true if the cycle moved to another level.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.tick = self.tick.wrapping_add(1);

        let grid = &mut self.grids[self.active];
        grid.advance_animations(elapsed_ms);
        grid.normalize();
        grid.collapse();
        self.controller.settle(grid, elapsed_ms);
        self.collect_events();

        self.try_advance()
    }

    /// Move the active grid's events into the cycle log
    fn collect_events(&mut self) {
        let level = self.active;
        for event in self.grids[level].drain_events() {
            record(&mut self.events, level, event);
        }
    }

    /// Leave a finished level once it has come to rest
    fn try_advance(&mut self) -> bool {
        let grid = &self.grids[self.active];
        if !grid.is_complete() || !grid.is_normalized() || grid.has_moving_elements() {
            return false;
        }

        let from = self.active;
        let outgoing = &mut self.grids[from];
        outgoing.restore_home();
        outgoing.set_active(false);

        self.active = (from + 1) % self.grids.len();
        let incoming = &mut self.grids[self.active];
        incoming.set_active(true);
        incoming.reset_animations(&mut self.rng);
        record(
            &mut self.events,
            self.active,
            GridEvent::LevelAdvanced {
                from,
                to: self.active,
            },
        );

        true
    }

    /// Drain the events recorded since the last call, oldest first.
    ///
    /// At most [`EVENT_LOG_CAPACITY`] events are kept between calls.
    pub fn take_events(&mut self) -> Vec<CycleEvent> {
        self.events.drain(..).collect()
    }

    pub fn snapshot_into(&self, out: &mut CycleSnapshot) {
        let grid = self.grid();
        out.level_index = self.active;
        if out.level_name != grid.name() {
            out.level_name.clear();
            out.level_name.push_str(grid.name());
        }
        grid.snapshot_into(&mut out.grid);
    }

    pub fn snapshot(&self) -> CycleSnapshot {
        let mut s = CycleSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::AuthoredLayout;
    use crate::types::TICK_MS;
    use crate::visual::AnimationState;

    fn row_of_three() -> Grid {
        row_of_three_destroyed_in(0)
    }

    fn row_of_three_destroyed_in(destroy_ms: u32) -> Grid {
        Grid::from_layout(
            &AuthoredLayout::new(3, 1, 1)
                .with(0, 0, 0)
                .with(1, 0, 0)
                .with(2, 0, 0),
            destroy_ms,
        )
        .unwrap()
    }

    /// Tick until the cycle moves on, returning the tick count
    fn ticks_to_advance(cycle: &mut LevelCycle) -> u32 {
        for n in 1..=500 {
            if cycle.tick(TICK_MS) {
                return n;
            }
        }
        panic!("level never advanced");
    }

    #[test]
    fn test_rejects_empty_and_bad_start() {
        assert_eq!(LevelCycle::new(Vec::new(), 0).unwrap_err(), CycleError::NoLevels);
        assert_eq!(
            LevelCycle::new(vec![row_of_three()], 1).unwrap_err(),
            CycleError::StartOutOfRange { index: 1, count: 1 }
        );
    }

    #[test]
    fn test_only_start_grid_is_active() {
        let cycle = LevelCycle::new(vec![row_of_three(), row_of_three()], 1).unwrap();
        assert!(!cycle.grids()[0].is_active());
        assert!(cycle.grids()[1].is_active());
        assert_eq!(cycle.active_index(), 1);
    }

    #[test]
    fn test_wraps_after_last_level() {
        let mut cycle = LevelCycle::new(vec![row_of_three(), row_of_three()], 1).unwrap();

        let mut advanced = false;
        for _ in 0..10 {
            if cycle.tick(16) {
                advanced = true;
                break;
            }
        }
        assert!(advanced);
        assert_eq!(cycle.active_index(), 0);
        assert!(cycle.grids()[0].is_active());
        assert!(!cycle.grids()[1].is_active());

        // The finished grid was restored to its authored row.
        let restored = &cycle.grids()[1];
        assert_eq!(restored.live_element_count(), 3);
        assert!(!restored.is_complete());
    }

    #[test]
    fn test_entered_level_restarts_idle_animations() {
        let destroy_ms = 100;
        let mut cycle = LevelCycle::new(vec![row_of_three_destroyed_in(destroy_ms)], 0).unwrap();

        let first = ticks_to_advance(&mut cycle);
        assert!(first >= destroy_ms / TICK_MS);

        for cell in cycle.grid().cells() {
            let visual = cell.element().visual().unwrap();
            assert!(
                matches!(visual.animation.state(), AnimationState::Idle { .. }),
                "{:?} at {:?}",
                visual.animation.state(),
                cell.coord()
            );
        }

        // The second clear plays its destroy clip in full again.
        cycle.tick(TICK_MS);
        assert!(cycle
            .grid()
            .cells()
            .iter()
            .all(|c| c.element().visual().unwrap().animation.is_destroying()));
        let second = 1 + ticks_to_advance(&mut cycle);
        assert!(second >= destroy_ms / TICK_MS, "advanced after {} ticks", second);
    }

    #[test]
    fn test_events_are_tagged_with_their_level() {
        let mut cycle = LevelCycle::new(vec![row_of_three(), row_of_three()], 0).unwrap();
        ticks_to_advance(&mut cycle);

        let events = cycle.take_events();
        assert!(events.contains(&CycleEvent {
            level: 0,
            event: GridEvent::LevelComplete
        }));
        assert_eq!(
            events.last(),
            Some(&CycleEvent {
                level: 1,
                event: GridEvent::LevelAdvanced { from: 0, to: 1 }
            })
        );
        assert!(events[..events.len() - 1].iter().all(|e| e.level == 0));
        assert!(cycle.take_events().is_empty());
    }

    #[test]
    fn test_event_log_is_capped() {
        let mut cycle = LevelCycle::new(vec![row_of_three(), row_of_three()], 0).unwrap();
        for _ in 0..EVENT_LOG_CAPACITY {
            ticks_to_advance(&mut cycle);
        }

        let events = cycle.take_events();
        assert_eq!(events.len(), EVENT_LOG_CAPACITY);
        // The newest events survive.
        assert!(matches!(
            events.last().map(|e| e.event),
            Some(GridEvent::LevelAdvanced { .. })
        ));
    }
}
