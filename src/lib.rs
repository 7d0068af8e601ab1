//! Grid-focus navigation engine.
//!
//! A reusable state machine for moving a focus cursor through a linear item
//! list laid out as a row-major grid, opening a detail presentation for the
//! focused entry, and restoring focus when the detail is dismissed, even
//! when lifecycle signals (appear/disappear/dismiss) arrive in surprising
//! orders. Rendering, input capture, and scrolling stay host-owned; the
//! crate ships a crossterm input adapter and ANSI view helpers for demos.

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod focus;
pub mod input;
pub mod items;
pub mod logging;
pub mod metrics;
pub mod scroll;
pub mod topology;
pub mod view;
pub mod visibility;

pub use coordinator::NavigationCoordinator;
pub use engine::audit::{NavAudit, NavAuditEvent, NavAuditStage, NullNavAudit};
pub use engine::{EngineConfig, GridNavigationEngine, NavEvent, NavSnapshot};
pub use error::{NavError, Result};
pub use focus::{FocusController, MoveOutcome};
pub use input::{InputAction, map_key};
pub use items::{GridEntry, ItemId, ItemStore, ItemsChange};
pub use logging::{
    FieldMap, FileSink, LogLevel, LogRecord, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, field,
};
pub use metrics::{NavMetricSnapshot, NavMetrics};
pub use scroll::{NullScrollSync, RecordingScroll, ScrollRequester, ScrollSync};
pub use topology::{Direction, index_at, neighbor, position, row_count};
pub use visibility::VisibilityTracker;
