use thiserror::Error;

use crate::items::ItemId;

/// Unified result type for the gridnav crate.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors surfaced by the navigation engine.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("column count must be at least 1")]
    InvalidColumnCount,
    #[error("duplicate entry id `{0}`")]
    DuplicateEntry(ItemId),
}
