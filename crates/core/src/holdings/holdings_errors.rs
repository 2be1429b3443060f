use thiserror::Error;

/// Errors specific to holding management.
#[derive(Error, Debug)]
pub enum HoldingError {
    #[error("Holding not found: {0}")]
    NotFound(String),

    #[error("Holding already exists: {0}")]
    AlreadyExists(String),
}
