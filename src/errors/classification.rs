use super::types::ConsoleError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl ConsoleError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            ConsoleError::Unavailable(_) => ErrorClassification {
                error_type: "UnavailableError",
                retryable: true,
            },
            ConsoleError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            ConsoleError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },

            // Caller mistakes
            ConsoleError::MissingUserContext => ErrorClassification {
                error_type: "MissingUserContextError",
                retryable: false,
            },
            ConsoleError::AccountDisabled => ErrorClassification {
                error_type: "AccountDisabledError",
                retryable: false,
            },
            ConsoleError::Unauthorized(_) => ErrorClassification {
                error_type: "UnauthorizedError",
                retryable: false,
            },
            ConsoleError::InvalidParameter(_) => ErrorClassification {
                error_type: "InvalidParameterError",
                retryable: false,
            },
            ConsoleError::BadRequest(_) => ErrorClassification {
                error_type: "BadRequestError",
                retryable: false,
            },
            ConsoleError::Conflict(_) => ErrorClassification {
                error_type: "ConflictError",
                retryable: false,
            },
            ConsoleError::QuotaExceeded(_) => ErrorClassification {
                error_type: "QuotaExceededError",
                retryable: false,
            },
            ConsoleError::FieldValidation(_) => ErrorClassification {
                error_type: "FieldValidationError",
                retryable: false,
            },
            ConsoleError::PortPolicy(_) => ErrorClassification {
                error_type: "PortPolicyConflictError",
                retryable: false,
            },
            ConsoleError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },

            // Backend answered, but not usefully
            ConsoleError::OrgMismatch { .. } => ErrorClassification {
                error_type: "OrgMismatchError",
                retryable: false,
            },
            ConsoleError::Rejected(_) => ErrorClassification {
                error_type: "RejectedError",
                retryable: false,
            },
            ConsoleError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            ConsoleError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
            ConsoleError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            ConsoleError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            ConsoleError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
        }
    }

    /// True for failures a user caused and should see verbatim.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ConsoleError::QuotaExceeded(_)
                | ConsoleError::FieldValidation(_)
                | ConsoleError::PortPolicy(_)
                | ConsoleError::InvalidParameter(_)
                | ConsoleError::BadRequest(_)
                | ConsoleError::Conflict(_)
        )
    }
}
