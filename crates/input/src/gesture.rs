//! Swipe quantization for pointer input.
//!
//! A swipe starts on a cell and is snapped to one of the four orthogonal
//! directions by its angle. Swipes shorter than the minimum distance are
//! treated as taps and ignored.

use crate::types::{Coord, Direction, SwapRequest, Vec2, MIN_SWIPE_DISTANCE};

/// Angle of the swipe in degrees, in (-180, 180]
pub fn swipe_angle(start: Vec2, end: Vec2) -> f32 {
    (end.y - start.y).atan2(end.x - start.x).to_degrees()
}

/// Snap an angle (degrees) to a 4-way direction.
///
/// Up is (45, 135], Down is (-135, -45], Right is (-45, 45], Left is the rest.
pub fn direction_from_angle(angle: f32) -> Direction {
    if angle > 45.0 && angle <= 135.0 {
        Direction::Up
    } else if angle > -135.0 && angle <= -45.0 {
        Direction::Down
    } else if angle > -45.0 && angle <= 45.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Tracks a press/release pair and converts it into a swap request
#[derive(Debug, Clone)]
pub struct SwipeQuantizer {
    /// World position of cell (0, 0)'s lower-left corner
    origin: Vec2,
    min_distance: f32,
    pressed: Option<Vec2>,
}

impl SwipeQuantizer {
    pub fn new(origin: Vec2) -> Self {
        Self::with_min_distance(origin, MIN_SWIPE_DISTANCE)
    }

    pub fn with_min_distance(origin: Vec2, min_distance: f32) -> Self {
        Self {
            origin,
            min_distance,
            pressed: None,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Cell under a world-space point
    pub fn cell_at(&self, point: Vec2) -> Coord {
        Coord::new(
            (point.x - self.origin.x).floor() as i32,
            (point.y - self.origin.y).floor() as i32,
        )
    }

    /// Convert a complete swipe into a request, `None` for taps
    pub fn quantize(&self, start: Vec2, end: Vec2) -> Option<SwapRequest> {
        if start.distance(end) < self.min_distance {
            return None;
        }
        let dir = direction_from_angle(swipe_angle(start, end));
        Some(SwapRequest::toward(self.cell_at(start), dir))
    }

    pub fn press(&mut self, point: Vec2) {
        self.pressed = Some(point);
    }

    /// Finish the swipe started by the last [`press`](Self::press)
    pub fn release(&mut self, point: Vec2) -> Option<SwapRequest> {
        let start = self.pressed.take()?;
        self.quantize(start, point)
    }

    pub fn cancel(&mut self) {
        self.pressed = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
}

impl Default for SwipeQuantizer {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
