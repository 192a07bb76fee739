//! Crate-level error type.

use thiserror::Error;

use super::failure::HttpFailure;
use crate::traits::StorageError;

/// Errors returned by the portal services.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The request failed; interceptors have already run.
    #[error("{0}")]
    Request(#[from] HttpFailure),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The command line could not be understood.
    #[error("{0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortalError {
    /// The request failure, if that is what this is.
    pub fn failure(&self) -> Option<&HttpFailure> {
        match self {
            PortalError::Request(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Type alias for Results using PortalError.
pub type PortalResult<T> = Result<T, PortalError>;
