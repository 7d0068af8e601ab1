//! Focus module orchestrator.
//!
//! Single source of truth for the focused index.

mod core;

pub use core::{FocusController, MoveOutcome};
