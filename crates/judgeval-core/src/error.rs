use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure surfaced by the SDK.
///
/// Callers branch on [`JudgmentError::Api`] for remote failures; the other
/// variants indicate misuse of the SDK or an internal invariant violation.
#[derive(Debug, Error)]
pub enum JudgmentError {
    /// The Judgment API rejected or failed a call.
    #[error("{status_code}: {detail}")]
    Api { status_code: u16, detail: String },

    /// An evaluation asserted as a test did not pass.
    #[error("{message}")]
    Test {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message}")]
    Runtime {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A builder or configuration value is missing or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment error: {0}")]
    Env(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, JudgmentError>;

impl JudgmentError {
    pub fn api(status_code: u16, detail: impl Into<String>) -> Self {
        JudgmentError::Api {
            status_code,
            detail: detail.into(),
        }
    }

    pub fn test(message: impl Into<String>) -> Self {
        JudgmentError::Test {
            message: message.into(),
            source: None,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        JudgmentError::Runtime {
            message: message.into(),
            source: None,
        }
    }

    pub fn runtime_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        JudgmentError::Runtime {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        JudgmentError::InvalidConfig(message.into())
    }

    /// HTTP status of an API error, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            JudgmentError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_api_error_display_and_status() {
        let err = JudgmentError::api(404, "scorer not found");
        assert_eq!(err.to_string(), "404: scorer not found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_non_api_errors_have_no_status() {
        assert_eq!(JudgmentError::runtime("boom").status_code(), None);
        assert_eq!(JudgmentError::invalid_config("name required").status_code(), None);
    }

    #[test]
    fn test_runtime_with_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = JudgmentError::runtime_with("failed to write", io);

        assert_eq!(err.to_string(), "failed to write");
        assert_eq!(err.source().map(|e| e.to_string()), Some("disk full".to_string()));
    }

    #[test]
    fn test_test_error_without_cause() {
        let err = JudgmentError::test("2/3 examples failed");
        assert!(err.source().is_none());
        assert!(matches!(err, JudgmentError::Test { .. }));
    }
}
