//! Error types for radius search.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// A precondition on the search arguments was violated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An output or hash table buffer could not be allocated.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<TryReserveError> for SearchError {
    fn from(err: TryReserveError) -> Self {
        SearchError::ResourceExhausted(err.to_string())
    }
}

impl From<radius_search_types::ParseMetricError> for SearchError {
    fn from(err: radius_search_types::ParseMetricError) -> Self {
        SearchError::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
