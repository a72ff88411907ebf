/// Errors raised while loading heapwatch configuration.
///
/// Sampling, logging, forced collection and status queries never fail, and
/// failures of monitored operations are handed back to the caller untouched,
/// so this type only covers the configuration surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidData(msg.into())
    }
}

/// Result type for heapwatch operations
pub type Result<T> = std::result::Result<T, Error>;
