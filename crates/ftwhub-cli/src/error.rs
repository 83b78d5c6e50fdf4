//! Client error types.

use ftwhub_core::{MonthParseError, NormalizeError, TracingError};
use thiserror::Error;

use crate::loader::LoadError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error, mostly from writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data files could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The dataset could not be normalized.
    #[error("invalid event data: {0}")]
    Normalize(#[from] NormalizeError),

    /// Bad `MONTH` argument.
    #[error(transparent)]
    Month(#[from] MonthParseError),

    /// Output could not be serialized.
    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Tracing(#[from] TracingError),
}
