//! Error types for the store layer.

/// Errors raised while acquiring or using a store connection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or opened.
    #[error("store unavailable: {0}")]
    Connection(String),

    /// A statement failed to execute (constraint violation, missing table,
    /// malformed SQL).
    #[error("statement execution failed: {0}")]
    Execution(String),
}

impl StoreError {
    pub fn connection(err: impl std::fmt::Display) -> Self {
        Self::Connection(err.to_string())
    }

    pub fn execution(err: impl std::fmt::Display) -> Self {
        Self::Execution(err.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Execution(err.to_string())
    }
}
