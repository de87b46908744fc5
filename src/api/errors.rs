use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};

use crate::errors::ConsoleError;

impl ConsoleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::MissingUserContext | ConsoleError::AccountDisabled | ConsoleError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            ConsoleError::InvalidParameter(_)
            | ConsoleError::BadRequest(_)
            | ConsoleError::QuotaExceeded(_)
            | ConsoleError::FieldValidation(_)
            | ConsoleError::PortPolicy(_) => StatusCode::BAD_REQUEST,
            ConsoleError::Conflict(_) => StatusCode::CONFLICT,
            ConsoleError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            let class = self.classify();
            error!(error = %self, error_type = class.error_type, "Request failed");
        } else if !self.is_user_facing() {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = match &self {
            ConsoleError::FieldValidation(errors) => json!({
                "status": "error",
                "msg": "validation failed",
                "errors": errors,
            }),
            other => json!({"status": "error", "msg": other.public_message()}),
        };

        (status, Json(body)).into_response()
    }
}
