//! Scroll module orchestrator.
//!
//! The presentation layer owns actual scrolling; this module defines the
//! contract the engine talks to and a requester that keeps the contract
//! idempotent under repeated focus changes.

mod core;

pub use core::{NullScrollSync, RecordingScroll, ScrollRequester, ScrollSync};
