use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::config::credentials::token_matches;
use crate::errors::ConsoleError;

/// Require `Authorization: Bearer <token>` when an API token is configured.
pub async fn api_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ConsoleError> {
    if let Some(expected_token) = state.api_token.as_deref().filter(|t| !t.is_empty()) {
        let auth_header = request
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => {
                if !token_matches(token, expected_token) {
                    return Err(ConsoleError::Unauthorized("Invalid API token".into()));
                }
            }
            None => {
                return Err(ConsoleError::Unauthorized("Missing Authorization header".into()));
            }
        }
    }

    Ok(next.run(request).await)
}
