//! Visual module - the per-element animation and position collaborator
//!
//! The engine never renders. It only needs to poll two things from whatever
//! draws the grid: "has the destroy animation finished?" and "has the element
//! reached its cell?". [`Visual`] is the state a renderer mirrors; the
//! destroy animation is timed by [`Visual::advance`] so the engine also runs
//! headless, and a renderer can report completion early via
//! [`Animation::finish_destroy`].

use crate::types::Vec2;

/// Animation clip currently playing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// Looping idle clip started at `phase` in [0, 1)
    Idle { phase: f32 },
    /// Destroy clip in progress
    Destroying { elapsed_ms: u32 },
    /// Destroy clip played to the end
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    state: AnimationState,
    destroy_duration_ms: u32,
}

impl Animation {
    pub fn new(destroy_duration_ms: u32) -> Self {
        Self {
            state: AnimationState::Idle { phase: 0.0 },
            destroy_duration_ms,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Restart the idle loop from `phase`
    pub fn play_idle_from(&mut self, phase: f32) {
        self.state = AnimationState::Idle { phase };
    }

    /// Start the destroy clip. No-op if it is already playing or finished.
    pub fn play_destroy(&mut self) {
        if let AnimationState::Idle { .. } = self.state {
            self.state = if self.destroy_duration_ms == 0 {
                AnimationState::Destroyed
            } else {
                AnimationState::Destroying { elapsed_ms: 0 }
            };
        }
    }

    /// Completion signal from a renderer
    pub fn finish_destroy(&mut self) {
        if let AnimationState::Destroying { .. } = self.state {
            self.state = AnimationState::Destroyed;
        }
    }

    pub fn is_destroying(&self) -> bool {
        matches!(self.state, AnimationState::Destroying { .. })
    }

    pub fn is_destroy_finished(&self) -> bool {
        matches!(self.state, AnimationState::Destroyed)
    }

    /// Back to idle, forgetting any destroy progress
    pub fn reset_to_idle(&mut self, phase: f32) {
        self.play_idle_from(phase);
    }

    /// Advance the clip clock
    pub fn advance(&mut self, elapsed_ms: u32) {
        if let AnimationState::Destroying { elapsed_ms: done } = self.state {
            let done = done.saturating_add(elapsed_ms);
            self.state = if done >= self.destroy_duration_ms {
                AnimationState::Destroyed
            } else {
                AnimationState::Destroying { elapsed_ms: done }
            };
        }
    }
}

/// On-screen presence of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub position: Vec2,
    pub active: bool,
    pub animation: Animation,
}

impl Visual {
    pub fn new(position: Vec2, destroy_duration_ms: u32) -> Self {
        Self {
            position,
            active: true,
            animation: Animation::new(destroy_duration_ms),
        }
    }

    /// Step toward `target` by interpolation factor `rate`.
    ///
    /// Snaps and returns true once the remaining distance is below `rate`.
    pub fn move_toward(&mut self, target: Vec2, rate: f32) -> bool {
        if self.position.distance(target) < rate {
            self.position = target;
            return true;
        }
        self.position = self.position.lerp(target, rate);
        false
    }

    pub fn has_reached(&self, target: Vec2) -> bool {
        self.position == target
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.animation.advance(elapsed_ms);
    }
}
