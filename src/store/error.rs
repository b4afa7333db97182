use std::path::PathBuf;

use thiserror::Error;

use super::RecordId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} is too large to represent")]
    Overflow(String),
    #[error("record not found, ID: {0}")]
    NotFound(RecordId),
    #[error("document {path:?} is corrupt: {reason}")]
    CorruptStore { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
