use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// The GitHub Users API could not be reached or answered with a non-2xx status.
    SourceUnavailable(String),
    /// Saving a single user failed.
    PersistenceFailure(String),
    DatabaseError(String),
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            AppError::PersistenceFailure(msg) => write!(f, "Persistence failure: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

/// Message returned to HTTP callers whenever an orchestration step fails.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
