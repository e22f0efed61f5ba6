//! Element module - the typed content of a cell
//!
//! Elements are created once alongside their cell and mutated in place for
//! the lifetime of the grid. Clearing a match turns an element Empty; it is
//! never dropped or reallocated.

use crate::types::{Coord, ElementKind, Vec2};
use crate::visual::Visual;

/// Stable element identity within one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Where an element starts in the authored layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Home {
    pub coord: Coord,
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    home: Home,
    pub(crate) kind: ElementKind,
    pub(crate) is_moving: bool,
    pub(crate) is_settled: bool,
    pub(crate) is_matched: bool,
    pub(crate) visual: Option<Visual>,
}

impl Element {
    pub(crate) fn new(id: ElementId, home: Home, visual: Option<Visual>) -> Self {
        Self {
            id,
            home,
            kind: home.kind,
            is_moving: false,
            is_settled: true,
            is_matched: false,
            visual,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn home(&self) -> Home {
        self.home
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_settled(&self) -> bool {
        self.is_settled
    }

    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    pub fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }

    /// Renderer hook: report the destroy clip as finished
    pub fn finish_destroy(&mut self) {
        if let Some(visual) = self.visual.as_mut() {
            visual.animation.finish_destroy();
        }
    }

    /// Counts toward completion: has content and is visible
    pub fn is_live(&self) -> bool {
        !self.is_empty() && self.visual.as_ref().is_some_and(|v| v.active)
    }

    /// A missing visual has nothing to wait for
    pub(crate) fn is_destroy_finished(&self) -> bool {
        self.visual
            .as_ref()
            .map_or(true, |v| v.animation.is_destroy_finished())
    }

    pub(crate) fn play_destroy(&mut self) {
        if let Some(visual) = self.visual.as_mut() {
            visual.animation.play_destroy();
        }
    }

    /// Start animating toward a new cell
    pub(crate) fn begin_move(&mut self) {
        self.is_moving = true;
        self.is_settled = false;
    }

    pub(crate) fn land(&mut self) {
        self.is_moving = false;
        self.is_settled = true;
    }

    /// Turn a destroyed match into an Empty slot
    pub(crate) fn clear(&mut self) {
        self.kind = ElementKind::Empty;
        if let Some(visual) = self.visual.as_mut() {
            visual.active = false;
        }
        self.is_matched = false;
        self.land();
    }

    /// Back to the authored state, snapped onto `center`
    pub(crate) fn reset_home(&mut self, center: Vec2) {
        self.kind = self.home.kind;
        self.is_matched = false;
        self.land();
        if let Some(visual) = self.visual.as_mut() {
            visual.active = true;
            visual.position = center;
        }
    }
}
