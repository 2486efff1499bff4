//! # Store Errors
//!
//! Errors raised by the storage layer itself. Domain crates translate these into their own
//! taxonomy; the only variant with domain meaning is [`StoreError::NotFound`].

use std::time::Duration;

/// Errors that can occur while talking to an entity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Store did not answer within {0:?}")]
    Timeout(Duration),
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Returns `true` for infrastructure failures (closed, dropped, timed out), as opposed to
    /// answers the store actually gave.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Closed | Self::Dropped | Self::Timeout(_))
    }
}

/// Result alias used across the store API.
pub type StoreResult<T> = Result<T, StoreError>;
