use thiserror::Error;

/// numex error types
#[derive(Error, Debug)]
pub enum NumexError {
    /// HTTP request failed or the response body was not valid JSON
    #[error("api error: {0}")]
    Api(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot export failed
    #[error("export error: {0}")]
    Export(String),
}

/// Result type alias for numex
pub type Result<T> = std::result::Result<T, NumexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumexError::Api("getinfo returned 500".into());
        assert_eq!(err.to_string(), "api error: getinfo returned 500");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NumexError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
