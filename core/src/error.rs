use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Work queue is empty")]
    EmptyQueue,

    #[error("Invalid configuration for '{field}': {reason}")]
    Configuration { field: &'static str, reason: String },

    #[error("Invalid tick: expected {expected}, got {actual}")]
    TickMismatch { expected: u64, actual: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration { field, reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
