//! Items module orchestrator.
//!
//! Owns the ordered entry sequence the grid is navigating over.

mod core;

pub use core::{GridEntry, ItemId, ItemStore, ItemsChange};
