//! Error types for formz

use thiserror::Error;

/// Failure reported by a collaborator ([`crate::RowStore`], [`crate::SqlExecutor`])
#[derive(Error, Debug)]
pub enum FormzError {
    /// The backend call itself failed (network, permissions, missing table)
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for formz operations
pub type Result<T> = std::result::Result<T, FormzError>;
