//! Grid module - the cell arena and its normalization state machine
//!
//! The grid is a `width x height` field of cells stored as a flat vector
//! (row-major, `y * width + x`, row 0 at the bottom). Each cell owns one
//! element for the whole session; play only moves elements between cells
//! and flips their kinds.
//!
//! Per tick the driver calls, in order:
//!
//! 1. [`Grid::advance_animations`] - the headless animation clock
//! 2. [`Grid::normalize`] - match scan, destroy polling, clearing
//! 3. [`Grid::collapse`] - one gravity pass
//! 4. [`crate::SwapController::settle`] - position interpolation
//!
//! Status flags:
//!
//! - `normalized`: nothing pending; swaps are accepted
//! - `collapsing`: a gravity pass is still shifting content, matching waits
//! - `complete`: no live element remains, the level is done

use arrayvec::ArrayVec;

use crate::cell::Cell;
use crate::element::{Element, ElementId, Home};
use crate::event::GridEvent;
use crate::layout::{AuthoredLayout, LayoutError};
use crate::rng::SimpleRng;
use crate::snapshot::GridSnapshot;
use crate::types::{Coord, Direction, ElementKind, Vec2};
use crate::visual::Visual;

const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Down,
    Direction::Up,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    name: String,
    width: u16,
    height: u16,
    origin: Vec2,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    is_normalized: bool,
    is_collapsing: bool,
    is_complete: bool,
    is_active: bool,
    /// Match set being destroyed; `None` until the next scan
    matches: Option<Vec<ElementId>>,
    /// Reused buffer for finished-destruction indices
    finished: Vec<usize>,
    events: Vec<GridEvent>,
}

impl Grid {
    /// Build a grid from a validated layout.
    ///
    /// Non-Empty authored elements get a visual placed on their cell center.
    pub fn from_layout(
        layout: &AuthoredLayout,
        destroy_duration_ms: u32,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;

        let width = layout.width;
        let height = layout.height;
        let mut cells = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let coord = Coord::new(x, y);
                let kind = layout.kind_at(coord);
                let visual = (!kind.is_empty())
                    .then(|| Visual::new(coord.center(layout.origin), destroy_duration_ms));
                let id = ElementId(cells.len() as u32);
                let element = Element::new(id, Home { coord, kind }, visual);
                cells.push(Cell::new(coord, element));
            }
        }

        Ok(Self {
            name: layout.name.clone(),
            width,
            height,
            origin: layout.origin,
            cells,
            is_normalized: false,
            is_collapsing: false,
            is_complete: false,
            is_active: true,
            matches: None,
            finished: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn is_normalized(&self) -> bool {
        self.is_normalized
    }

    pub fn is_collapsing(&self) -> bool {
        self.is_collapsing
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Calculate flat index from coordinates, `None` if out of bounds
    #[inline(always)]
    pub fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width as i32
            && coord.y < self.height as i32
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|idx| &self.cells[idx])
    }

    pub fn element(&self, coord: Coord) -> Option<&Element> {
        self.cell(coord).map(Cell::element)
    }

    pub fn kind(&self, coord: Coord) -> Option<ElementKind> {
        self.element(coord).map(Element::kind)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// In-bounds orthogonal neighbours of `coord`
    pub fn neighbors(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        NEIGHBOR_ORDER
            .iter()
            .map(|&dir| coord.step(dir))
            .filter(|&c| self.contains(c))
            .collect()
    }

    /// Cell index currently holding element `id`
    pub fn locate(&self, id: ElementId) -> Option<usize> {
        self.cells.iter().position(|c| c.element.id() == id)
    }

    /// Any element still animating toward its cell
    pub fn has_moving_elements(&self) -> bool {
        self.cells
            .iter()
            .any(|c| c.element.is_moving() || !c.element.is_settled())
    }

    /// Non-Empty elements with an active visual
    pub fn live_element_count(&self) -> usize {
        self.cells.iter().filter(|c| c.element.is_live()).count()
    }

    /// Size of the match set currently being destroyed
    pub fn pending_matches(&self) -> usize {
        self.matches.as_ref().map_or(0, Vec::len)
    }

    /// Drain recorded events.
    ///
    /// The log grows until drained. [`crate::LevelCycle`] empties it every
    /// tick; callers driving a bare grid must call this themselves.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn drain_events(&mut self) -> std::vec::Drain<'_, GridEvent> {
        self.events.drain(..)
    }

    pub(crate) fn push_event(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    /// Renderer hook: the destroy clip of the element at `coord` finished
    pub fn finish_destroy_at(&mut self, coord: Coord) {
        if let Some(idx) = self.index(coord) {
            self.cells[idx].element.finish_destroy();
        }
    }

    /// Flag every element that sits in a horizontal or vertical run of three
    /// and return their ids in row-major order.
    pub fn find_matches(&mut self) -> Vec<ElementId> {
        for idx in 0..self.cells.len() {
            let kind = self.cells[idx].element.kind();
            if kind.is_empty() {
                continue;
            }
            let coord = self.cells[idx].coord();

            for (a, b) in [
                (Direction::Left, Direction::Right),
                (Direction::Down, Direction::Up),
            ] {
                let (Some(ia), Some(ib)) = (self.index(coord.step(a)), self.index(coord.step(b)))
                else {
                    continue;
                };
                if self.cells[ia].element.kind() == kind && self.cells[ib].element.kind() == kind {
                    for i in [ia, idx, ib] {
                        self.cells[i].element.is_matched = true;
                    }
                }
            }
        }

        self.cells
            .iter()
            .filter(|c| c.element.is_matched())
            .map(|c| c.element.id())
            .collect()
    }

    /// One normalization step: scan, poll destruction, clear.
    pub fn normalize(&mut self) {
        if self.is_normalized || self.is_collapsing {
            return;
        }

        if self.matches.is_none() {
            let found = self.find_matches();
            for &id in &found {
                if let Some(idx) = self.locate(id) {
                    self.cells[idx].element.play_destroy();
                }
            }
            if !found.is_empty() {
                self.events.push(GridEvent::MatchesFound { count: found.len() });
            }
            self.matches = Some(found);
        }

        let Some(mut tracked) = self.matches.take() else {
            return;
        };

        let mut cleared = 0;
        if !tracked.is_empty() {
            // Collect first, clear in a second pass.
            self.finished.clear();
            for &id in &tracked {
                if let Some(idx) = self.locate(id) {
                    if self.cells[idx].element.is_destroy_finished() && !self.finished.contains(&idx)
                    {
                        self.finished.push(idx);
                    }
                }
            }

            if self.finished.len() == tracked.len() {
                for &idx in &self.finished {
                    self.cells[idx].element.clear();
                }
                cleared = tracked.len();
                tracked.clear();
            }
        }

        if !tracked.is_empty() {
            self.matches = Some(tracked);
            return;
        }

        if cleared > 0 {
            self.is_collapsing = true;
            self.is_normalized = false;
            self.events.push(GridEvent::MatchesCleared { count: cleared });
        } else {
            self.is_normalized = true;
        }

        if !self.is_complete && self.live_element_count() == 0 {
            self.is_complete = true;
            self.events.push(GridEvent::LevelComplete);
        }
    }

    /// One gravity pass. Returns true if anything moved.
    ///
    /// Scans each column bottom-up, shifting content down over the run of
    /// Empty cells seen so far. A pass without swaps ends the collapse.
    pub fn collapse(&mut self) -> bool {
        if !self.is_collapsing {
            return false;
        }

        let width = self.width as usize;
        let mut swapped = false;

        for x in 0..width {
            let mut empty_run = 0usize;
            for y in 0..self.height as usize {
                let idx = y * width + x;
                if self.cells[idx].element.is_empty() {
                    empty_run += 1;
                } else if empty_run > 0 {
                    let below = (y - empty_run) * width + x;
                    self.swap_with_motion(idx, below);
                    swapped = true;
                }
            }
        }

        if !swapped {
            self.is_collapsing = false;
            self.events.push(GridEvent::CollapseSettled);
        }

        swapped
    }

    /// Exchange the contents of two cells by index
    fn swap_content(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.cells.split_at_mut(hi);
        left[lo].swap_content(&mut right[0]);
    }

    /// Swap and start non-Empty elements animating toward their new cells
    pub(crate) fn swap_with_motion(&mut self, a: usize, b: usize) {
        self.swap_content(a, b);
        for idx in [a, b] {
            let element = &mut self.cells[idx].element;
            if !element.is_empty() {
                element.begin_move();
            }
        }
    }

    /// A landed element may have created matches or gaps
    pub(crate) fn invalidate_after_landing(&mut self) {
        self.is_normalized = false;
        self.is_collapsing = true;
    }

    /// Put every element back on its home cell in its authored state
    pub fn restore_home(&mut self) {
        for target in 0..self.cells.len() {
            let coord = self.cells[target].coord();
            let Some(source) = self
                .cells
                .iter()
                .position(|c| c.element.home().coord == coord)
            else {
                continue;
            };

            self.swap_content(source, target);
            for idx in [source, target] {
                let center = self.cells[idx].coord().center(self.origin);
                self.cells[idx].element.reset_home(center);
            }
        }

        self.matches = None;
        self.is_collapsing = false;
        self.is_normalized = false;
        self.is_complete = false;
    }

    /// Advance every destroy clip
    pub fn advance_animations(&mut self, elapsed_ms: u32) {
        for cell in &mut self.cells {
            if let Some(visual) = cell.element.visual.as_mut() {
                visual.advance(elapsed_ms);
            }
        }
    }

    /// Restart every visual on its idle loop from a random phase
    pub fn reset_animations(&mut self, rng: &mut SimpleRng) {
        for cell in &mut self.cells {
            if let Some(visual) = cell.element.visual.as_mut() {
                visual.animation.reset_to_idle(rng.next_phase());
            }
        }
    }

    /// Write the current state into `out`, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.width = self.width;
        out.height = self.height;
        out.kinds.clear();
        out.kinds
            .extend(self.cells.iter().map(|c| c.element.kind().raw()));
        out.board_hash = GridSnapshot::hash_kinds(&out.kinds);
        out.normalized = self.is_normalized;
        out.collapsing = self.is_collapsing;
        out.complete = self.is_complete;
        out.moving = self.has_moving_elements();
        out.live_elements = self.live_element_count();
        out.pending_matches = self.pending_matches();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: i32 = 0;
    const B: i32 = 1;

    fn grid(layout: AuthoredLayout) -> Grid {
        Grid::from_layout(&layout, 0).unwrap()
    }

    fn kinds_column(grid: &Grid, x: i32) -> Vec<ElementKind> {
        (0..grid.height() as i32)
            .map(|y| grid.kind(Coord::new(x, y)).unwrap())
            .collect()
    }

    #[test]
    fn test_index_calculation() {
        let g = grid(AuthoredLayout::new(4, 3, 1));
        assert_eq!(g.index(Coord::new(0, 0)), Some(0));
        assert_eq!(g.index(Coord::new(3, 0)), Some(3));
        assert_eq!(g.index(Coord::new(0, 1)), Some(4));
        assert_eq!(g.index(Coord::new(3, 2)), Some(11));
        assert_eq!(g.index(Coord::new(-1, 0)), None);
        assert_eq!(g.index(Coord::new(4, 0)), None);
        assert_eq!(g.index(Coord::new(0, 3)), None);
    }

    #[test]
    fn test_only_authored_tiles_get_visuals() {
        let g = grid(AuthoredLayout::new(2, 1, 1).with(0, 0, A));
        assert!(g.element(Coord::new(0, 0)).unwrap().visual().is_some());
        assert!(g.element(Coord::new(1, 0)).unwrap().visual().is_none());
        assert_eq!(g.live_element_count(), 1);
    }

    #[test]
    fn test_neighbors_at_corner() {
        let g = grid(AuthoredLayout::new(3, 3, 1));
        let corner = g.neighbors(Coord::new(0, 0));
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&Coord::new(1, 0)));
        assert!(corner.contains(&Coord::new(0, 1)));
        assert_eq!(g.neighbors(Coord::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_vertical_match_flags_three() {
        let mut g = grid(
            AuthoredLayout::new(1, 4, 2)
                .with(0, 0, A)
                .with(0, 1, A)
                .with(0, 2, A)
                .with(0, 3, B),
        );
        let found = g.find_matches();
        assert_eq!(found, vec![ElementId(0), ElementId(1), ElementId(2)]);
        assert!(!g.element(Coord::new(0, 3)).unwrap().is_matched());
    }

    #[test]
    fn test_cross_shape_flags_both_axes() {
        let mut g = grid(
            AuthoredLayout::new(3, 3, 1)
                .with(0, 1, A)
                .with(1, 1, A)
                .with(2, 1, A)
                .with(1, 0, A)
                .with(1, 2, A),
        );
        assert_eq!(g.find_matches().len(), 5);
    }

    #[test]
    fn test_missing_visual_is_tolerated_during_destruction() {
        let mut g = grid(
            AuthoredLayout::new(3, 1, 1)
                .with(0, 0, A)
                .with(1, 0, A)
                .with(2, 0, A),
        );
        g.cells[1].element.visual = None;

        g.normalize();
        assert!(g.kind(Coord::new(1, 0)).unwrap().is_empty());
        assert!(g.is_collapsing());
    }

    #[test]
    fn test_destruction_waits_for_every_clip() {
        let mut g = Grid::from_layout(
            &AuthoredLayout::new(3, 1, 1)
                .with(0, 0, A)
                .with(1, 0, A)
                .with(2, 0, A),
            100,
        )
        .unwrap();

        g.normalize();
        assert_eq!(g.pending_matches(), 3);

        g.finish_destroy_at(Coord::new(0, 0));
        g.finish_destroy_at(Coord::new(2, 0));
        g.normalize();
        assert_eq!(g.pending_matches(), 3);
        assert_eq!(g.kind(Coord::new(0, 0)), Some(ElementKind::Tile(0)));

        g.advance_animations(100);
        g.normalize();
        assert_eq!(g.pending_matches(), 0);
        assert_eq!(g.live_element_count(), 0);
        assert!(g.is_complete());
    }

    #[test]
    fn test_collapse_single_pass_compacts_column() {
        let mut g = grid(
            AuthoredLayout::new(1, 5, 2)
                .with(0, 1, A)
                .with(0, 3, B)
                .with(0, 4, A),
        );
        g.is_collapsing = true;

        assert!(g.collapse());
        assert_eq!(
            kinds_column(&g, 0),
            vec![
                ElementKind::Tile(0),
                ElementKind::Tile(1),
                ElementKind::Tile(0),
                ElementKind::Empty,
                ElementKind::Empty,
            ]
        );

        assert!(!g.collapse());
        assert!(!g.is_collapsing());
    }

    #[test]
    fn test_collapse_marks_shifted_elements_moving() {
        let mut g = grid(AuthoredLayout::new(1, 2, 1).with(0, 1, A));
        g.is_collapsing = true;
        g.collapse();

        let landed = g.element(Coord::new(0, 0)).unwrap();
        assert!(landed.is_moving());
        assert!(!landed.is_settled());
        let empty = g.element(Coord::new(0, 1)).unwrap();
        assert!(!empty.is_moving());
    }

    #[test]
    fn test_events_are_drained() {
        let mut g = grid(
            AuthoredLayout::new(3, 1, 1)
                .with(0, 0, A)
                .with(1, 0, A)
                .with(2, 0, A),
        );
        g.normalize();
        let events = g.take_events();
        assert_eq!(
            events,
            vec![
                GridEvent::MatchesFound { count: 3 },
                GridEvent::MatchesCleared { count: 3 },
                GridEvent::LevelComplete,
            ]
        );
        assert!(g.take_events().is_empty());
    }
}
