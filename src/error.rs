//! Error types for prequel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Caller misuse: a kind-incompatible accumulation method, a delete
    /// compiled without conditions, or a limit missing its offset.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QueryError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for prequel operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::config("limit is missing its offset");
        assert_eq!(
            err.to_string(),
            "configuration error: limit is missing its offset"
        );
    }
}
