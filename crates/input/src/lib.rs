//! Input module (engine-facing).
//!
//! This crate is independent of any windowing or terminal framework. It turns
//! pointer swipes in world space into discrete [`crate::types::SwapRequest`]s
//! between a cell and one of its four neighbours. Whether a request is
//! accepted is up to the grid's swap controller.

pub mod gesture;

pub use tile_match_types as types;

pub use gesture::{direction_from_angle, swipe_angle, SwipeQuantizer};
