use thiserror::Error;

use crate::scangroup::ports::PortPolicyError;
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("missing user context")]
    MissingUserContext,

    #[error("user account disabled")]
    AccountDisabled,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{0}")]
    FieldValidation(FieldErrors),

    #[error("{0}")]
    PortPolicy(#[from] PortPolicyError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("organization id mismatch: expected {expected}, got {actual}")]
    OrgMismatch { expected: i32, actual: i32 },

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("{0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for ConsoleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ConsoleError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            ConsoleError::from_backend_status(status.as_u16(), e.to_string())
        } else {
            ConsoleError::Network(e.to_string())
        }
    }
}

impl ConsoleError {
    /// Map a non-success backend status code onto the error taxonomy.
    pub fn from_backend_status(status: u16, body: String) -> Self {
        match status {
            404 => ConsoleError::NotFound(body),
            408 | 504 => ConsoleError::Timeout(body),
            500..=599 => ConsoleError::Unavailable(body),
            _ => ConsoleError::Rejected(format!("status {}: {}", status, body)),
        }
    }

    /// Message shown to API callers. Collaborator failures are masked.
    pub fn public_message(&self) -> String {
        match self {
            ConsoleError::OrgMismatch { .. }
            | ConsoleError::Unavailable(_)
            | ConsoleError::Network(_)
            | ConsoleError::Timeout(_)
            | ConsoleError::Rejected(_)
            | ConsoleError::Io(_)
            | ConsoleError::Json(_)
            | ConsoleError::Yaml(_)
            | ConsoleError::Config(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_status_mapping() {
        assert!(matches!(ConsoleError::from_backend_status(404, "x".into()), ConsoleError::NotFound(_)));
        assert!(matches!(ConsoleError::from_backend_status(503, "x".into()), ConsoleError::Unavailable(_)));
        assert!(matches!(ConsoleError::from_backend_status(504, "x".into()), ConsoleError::Timeout(_)));
        assert!(matches!(ConsoleError::from_backend_status(400, "x".into()), ConsoleError::Rejected(_)));
    }

    #[test]
    fn test_public_message_masks_backend_detail() {
        let err = ConsoleError::Unavailable("dial tcp 10.0.0.4:8443: refused".into());
        assert_eq!(err.public_message(), "internal error");

        let err = ConsoleError::QuotaExceeded("this pricing plan only allows one scan group".into());
        assert_eq!(err.public_message(), "this pricing plan only allows one scan group");
    }
}
