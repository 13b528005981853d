//! Error types for schedule-engine operations.
//!
//! Malformed dates and times are not errors: they resolve to
//! [`Timestamp::Invalid`](crate::datetime::Timestamp::Invalid). This enum only
//! covers the collaborators around the pure core: configuration and the event
//! store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event store error: {0}")]
    Store(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
