//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the grid rules, state management and the tick-driven
//! normalization state machine. It has **no** rendering, input-device or I/O
//! dependencies, making it:
//!
//! - **Deterministic**: same level set and seed produce identical runs
//! - **Testable**: every rule is reachable without a renderer
//! - **Portable**: headless runner, terminal or GUI front ends
//! - **Allocation-free at rest**: ticking a settled grid does not allocate
//!
//! # Module Structure
//!
//! - [`element`]: typed cell content with matched/moving/settled flags and a home
//! - [`cell`]: fixed-coordinate slot owning one element
//! - [`grid`]: cell arena, match detection, destruction, gravity, restore-to-home
//! - [`swap`]: swap validation/execution and position settling
//! - [`cycle`]: the level set and the fixed-order tick
//! - [`layout`] / [`config`]: authored layouts and JSON level sets
//! - [`visual`]: the animation/position state a renderer mirrors
//!
//! # Game Rules
//!
//! - **Matches**: three identical tiles in a row or column; longer runs are
//!   caught through overlapping triples, diagonals never count
//! - **Destruction**: a match set is cleared only once every member's destroy
//!   animation has finished
//! - **Gravity**: after a clear, columns compact downward (row 0 is the bottom)
//! - **Swaps**: adjacent, non-Empty source, grid at rest, never lifting an
//!   Empty cell from directly above
//! - **Completion**: when no visible tile remains the cycle restores the level
//!   and moves on to the next one
//!
//! # Example
//!
//! ```
//! use tile_match_core::{AuthoredLayout, LevelCycle, Grid};
//! use tile_match_core::types::{Coord, TICK_MS};
//!
//! // A column with one tile out of place: A A B A
//! let layout = AuthoredLayout::new(2, 3, 2)
//!     .with(0, 0, 0)
//!     .with(0, 1, 0)
//!     .with(0, 2, 1)
//!     .with(1, 2, 0);
//! let grid = Grid::from_layout(&layout, 0).unwrap();
//! let mut cycle = LevelCycle::new(vec![grid], 0).unwrap();
//!
//! cycle.tick(TICK_MS); // first scan: nothing to match
//! assert!(cycle.request_swap(Coord::new(1, 2), Coord::new(0, 2)));
//!
//! for _ in 0..200 {
//!     cycle.tick(TICK_MS);
//! }
//! // The column of three A's cleared; the lone B is all that is left.
//! assert_eq!(cycle.grid().live_element_count(), 1);
//! ```

pub mod cell;
pub mod config;
pub mod cycle;
pub mod element;
pub mod event;
pub mod grid;
pub mod layout;
pub mod rng;
pub mod snapshot;
pub mod swap;
pub mod visual;

pub use tile_match_types as types;

// Re-export commonly used types for convenience
pub use cell::Cell;
pub use config::{ConfigError, LevelSetConfig};
pub use cycle::{CycleError, LevelCycle, EVENT_LOG_CAPACITY};
pub use element::{Element, ElementId, Home};
pub use event::{CycleEvent, GridEvent};
pub use grid::Grid;
pub use layout::{AuthoredLayout, LayoutError, StartElement};
pub use rng::SimpleRng;
pub use snapshot::{CycleSnapshot, GridSnapshot};
pub use swap::{SwapController, SwapRejection};
pub use visual::{Animation, AnimationState, Visual};
