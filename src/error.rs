//! Domain-specific error types for brunel-engine

use thiserror::Error;

use crate::clients::ClientError;
use crate::extract::ExtractionError;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum BrunelError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Model client error: {0}")]
    Client(#[from] ClientError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Request body exceeds the configured limit")]
    PayloadTooLarge,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<std::io::Error> for BrunelError {
    fn from(err: std::io::Error) -> Self {
        BrunelError::Internal {
            message: err.to_string(),
        }
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, BrunelError>;
