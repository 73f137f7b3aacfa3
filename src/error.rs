//! Error taxonomy for the linking engine.
//!
//! Only genuine faults surface as errors: configuration mistakes and database
//! failures. Empty candidate sets, provider outages and duplicate inserts are
//! all degraded paths, not errors — generation calls stay safe to retry.

use thiserror::Error;

/// Errors returned by linking services and repositories.
#[derive(Debug, Error)]
pub enum LinkingError {
    /// Configuration is nonsensical (zero caps, negative weights). Raised at
    /// service construction, before any generation runs.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Referenced article does not exist in the store.
    #[error("article {0} not found")]
    ArticleNotFound(i32),

    /// Underlying database failure. Uniqueness conflicts never reach this
    /// variant — idempotent inserts swallow them.
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LinkingError>;
