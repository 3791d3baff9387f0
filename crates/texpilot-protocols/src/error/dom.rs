//! Host document errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Could not get selection")]
    NoSelection,

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Text insertion failed: {0}")]
    InsertFailed(String),
}
