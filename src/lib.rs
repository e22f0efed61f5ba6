//! Tile Match (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `tile_match::{core,input,types}` and hosts the headless
//! script runner used by the `tile-match` binary.

pub use tile_match_core as core;
pub use tile_match_input as input;
pub use tile_match_types as types;

pub mod cli;
pub mod script;
