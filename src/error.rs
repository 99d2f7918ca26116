//! Error types for the catalog store, loaders and backups
//!
//! The financial engine has no error type: it answers every input.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: u64 },

    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    #[error("Record store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
