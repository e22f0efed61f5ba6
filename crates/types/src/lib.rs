//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable from the
//! grid engine, the input quantizer and the headless runner alike.
//!
//! # Coordinates
//!
//! Grids use a bottom-left origin:
//!
//! - **x**: column, growing to the right (0 = leftmost)
//! - **y**: row, growing upward (0 = bottom row)
//! - Gravity pulls elements toward `y = 0`
//!
//! The center of cell `(x, y)` in world space is `origin + (x + 0.5, y + 0.5)`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_SETTLE_RATE` | 6.5 | Interpolation factor per second while settling |
//! | `DEFAULT_DESTROY_ANIMATION_MS` | 400 | Length of the headless destroy animation |
//! | `MIN_SWIPE_DISTANCE` | 0.25 | Shortest swipe (world units) that counts as a swap |
//!
//! # Examples
//!
//! ```
//! use tile_match_types::{Coord, Direction, ElementKind};
//!
//! // Raw authored types: -1 is Empty, 0.. are tiles
//! assert_eq!(ElementKind::from_raw(-1, 2), Some(ElementKind::Empty));
//! assert_eq!(ElementKind::from_raw(1, 2), Some(ElementKind::Tile(1)));
//! assert_eq!(ElementKind::from_raw(2, 2), None);
//!
//! // Up is toward higher rows
//! let c = Coord::new(2, 3);
//! assert_eq!(c.step(Direction::Up), Coord::new(2, 4));
//! assert_eq!(c.step(Direction::Left), Coord::new(1, 3));
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Offset from a cell's lower-left corner to its center
pub const CENTER_OFFSET: f32 = 0.5;

/// Default settle interpolation rate (per second)
pub const DEFAULT_SETTLE_RATE: f32 = 6.5;

/// Default length of the destroy animation (400ms)
pub const DEFAULT_DESTROY_ANIMATION_MS: u32 = 400;

/// Minimum swipe length in world units
pub const MIN_SWIPE_DISTANCE: f32 = 0.25;

/// Raw authored value for an empty cell
pub const EMPTY_RAW: i32 = -1;

/// Content type of an element
///
/// `Empty` is a sentinel meaning "no playable content". Tiles are numbered
/// from zero up to the palette size of the level that declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    #[default]
    Empty,
    Tile(u8),
}

impl ElementKind {
    /// Parse an authored raw type against a palette of `palette` tile kinds
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_match_types::ElementKind;
    ///
    /// assert_eq!(ElementKind::from_raw(-1, 0), Some(ElementKind::Empty));
    /// assert_eq!(ElementKind::from_raw(0, 3), Some(ElementKind::Tile(0)));
    /// assert_eq!(ElementKind::from_raw(-2, 3), None);
    /// assert_eq!(ElementKind::from_raw(7, 3), None);
    /// ```
    pub fn from_raw(raw: i32, palette: u8) -> Option<Self> {
        if raw == EMPTY_RAW {
            return Some(ElementKind::Empty);
        }
        if raw >= 0 && raw < palette as i32 {
            return Some(ElementKind::Tile(raw as u8));
        }
        None
    }

    /// Convert back to the authored raw representation
    pub fn raw(self) -> i32 {
        match self {
            ElementKind::Empty => EMPTY_RAW,
            ElementKind::Tile(n) => n as i32,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, ElementKind::Empty)
    }
}

/// Orthogonal swipe/swap directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell delta for one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Grid coordinate (column, row)
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `dir` (may lie outside any grid)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// World-space center of this cell for a grid placed at `origin`
    pub fn center(self, origin: Vec2) -> Vec2 {
        Vec2::new(
            origin.x + self.x as f32 + CENTER_OFFSET,
            origin.y + self.y as f32 + CENTER_OFFSET,
        )
    }
}

impl From<[i32; 2]> for Coord {
    fn from(value: [i32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Coord> for [i32; 2] {
    fn from(value: Coord) -> Self {
        [value.x, value.y]
    }
}

/// World-space position
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward `target`, `t` clamped to [0, 1]
    pub fn lerp(self, target: Vec2, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}

/// A candidate swap between two cells, as delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapRequest {
    pub from: Coord,
    pub to: Coord,
}

impl SwapRequest {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    pub fn toward(from: Coord, dir: Direction) -> Self {
        Self::new(from, from.step(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(DEFAULT_SETTLE_RATE, 6.5);
        assert_eq!(MIN_SWIPE_DISTANCE, 0.25);
        assert_eq!(CENTER_OFFSET, 0.5);
    }

    #[test]
    fn raw_kind_round_trip_for_palette() {
        for raw in -1..4 {
            let kind = ElementKind::from_raw(raw, 4).unwrap();
            assert_eq!(kind.raw(), raw);
        }
        assert!(ElementKind::from_raw(4, 4).is_none());
        assert!(ElementKind::from_raw(0, 0).is_none());
    }

    #[test]
    fn steps_are_unit_and_opposite() {
        let c = Coord::new(1, 1);
        for (dir, back) in [
            (Direction::Up, Direction::Down),
            (Direction::Left, Direction::Right),
        ] {
            assert_ne!(c.step(dir), c);
            assert_eq!(c.step(dir).step(back), c);
        }
        assert_eq!(c.step(Direction::Down), Coord::new(1, 0));
    }

    #[test]
    fn cell_center_uses_origin() {
        let center = Coord::new(2, 0).center(Vec2::new(10.0, -1.0));
        assert_eq!(center, Vec2::new(12.5, -0.5));
    }

    #[test]
    fn lerp_clamps_factor() {
        let a = Vec2::ZERO;
        let b = Vec2::new(2.0, 0.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(1.0, 0.0));
        assert_eq!(a.lerp(b, 3.0), b);
    }

    #[test]
    fn serde_shapes() {
        let json = serde_json::to_string(&(Coord::new(2, -1), Direction::Left)).unwrap();
        assert_eq!(json, r#"[[2,-1],"left"]"#);
    }
}
