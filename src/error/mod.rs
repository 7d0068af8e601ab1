//! Error module orchestrator.
//!
//! The navigation core treats invalid runtime input (out-of-bounds moves,
//! stale restore targets) as no-ops rather than errors, so the error surface
//! here is limited to host configuration and data-integrity failures.

mod types;

pub use types::{NavError, Result};
