//! Error types for the Sora 2 client.

/// Errors that can occur while talking to the video generation service.
#[derive(Debug, thiserror::Error)]
pub enum Sora2Error {
    /// The client was constructed with unusable options (e.g. an empty API key).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was called with an unusable argument (e.g. an empty job id).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The service answered with a non-success HTTP status.
    #[error("API error: {status} - {message}")]
    RemoteRequestFailed {
        /// HTTP status code of the failed exchange.
        status: u16,
        /// Service-provided message, or a generic fallback naming the
        /// request path and status when the error body is unparsable.
        message: String,
        /// Machine-readable error code from the service, when present.
        code: Option<String>,
        /// Extra error payload from the service, verbatim, when present.
        details: Option<serde_json::Value>,
    },

    /// Network or HTTP-level failure raised by the bundled reqwest transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response carried a body that failed to parse as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Sora2Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Sora2Error::RemoteRequestFailed {
            status: 401,
            message: "Unauthorized".into(),
            code: Some("unauthorized".into()),
            details: None,
        };
        assert_eq!(err.to_string(), "API error: 401 - Unauthorized");

        let err = Sora2Error::InvalidArgument("job id must not be empty".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: job id must not be empty"
        );
    }

    #[test]
    fn test_json_error_is_converted() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Sora2Error = parse_err.into();
        assert!(matches!(err, Sora2Error::Json(_)));
    }
}
