//! Blockfall (workspace facade crate).
//!
//! Re-exports the rules engine as `blockfall::{core, types}` and adds the
//! pieces that touch the outside world: the JSON profile store, environment
//! configuration and the headless runner.

pub use blockfall_core as core;
pub use blockfall_types as types;

pub mod config;
pub mod profile_store;
pub mod runner;
