//! Caller identity taken from the headers set by the upstream authorizer.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use tracing::{info_span, warn, Instrument};

use crate::errors::ConsoleError;
use crate::models::{Subscription, UserContext};

pub const HEADER_ORG_ID: &str = "x-org-id";
pub const HEADER_ORG_CID: &str = "x-org-cid";
pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_USER_CID: &str = "x-user-cid";
pub const HEADER_SUBSCRIPTION_ID: &str = "x-subscription-id";
pub const HEADER_ORG_STATUS_ID: &str = "x-org-status-id";
pub const HEADER_ROLES: &str = "x-roles";
pub const HEADER_TRACE_ID: &str = "x-trace-id";
pub const HEADER_FORWARDED_FOR: &str = "x-forwarded-for";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn header_id(headers: &HeaderMap, name: &str) -> Option<i32> {
    header(headers, name).and_then(|v| v.parse().ok())
}

/// Build a [`UserContext`] from request headers. `None` when org or user
/// identity is missing or malformed.
pub fn extract_user_context(headers: &HeaderMap) -> Option<UserContext> {
    let org_id = header_id(headers, HEADER_ORG_ID)?;
    let user_id = header_id(headers, HEADER_USER_ID)?;

    let roles = header(headers, HEADER_ROLES)
        .map(|r| r.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
        .unwrap_or_default();

    let ip_address = header(headers, HEADER_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_default();

    let trace_id = header(headers, HEADER_TRACE_ID)
        .map(String::from)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    Some(UserContext {
        trace_id,
        org_id,
        org_cid: header(headers, HEADER_ORG_CID).unwrap_or_default().to_string(),
        user_id,
        user_cid: header(headers, HEADER_USER_CID).unwrap_or_default().to_string(),
        roles,
        ip_address,
        subscription: Subscription::from(header_id(headers, HEADER_SUBSCRIPTION_ID).unwrap_or_default()),
        org_status_id: header_id(headers, HEADER_ORG_STATUS_ID).unwrap_or_default(),
    })
}

/// Attach the caller's [`UserContext`] to the request, or reject it with 401.
pub async fn user_context_middleware(mut request: Request, next: Next) -> Result<Response, ConsoleError> {
    let Some(ctx) = extract_user_context(request.headers()) else {
        warn!(path = %request.uri().path(), "Request without user context");
        return Err(ConsoleError::MissingUserContext);
    };

    let span = info_span!(
        "user_request",
        trace_id = %ctx.trace_id,
        org_id = ctx.org_id,
        user_id = ctx.user_id,
    );
    request.extensions_mut().insert(ctx);
    Ok(next.run(request).instrument(span).await)
}

/// Reject callers whose organization is locked out of mutating calls.
pub fn ensure_enabled(ctx: &UserContext) -> Result<(), ConsoleError> {
    if ctx.account_disabled() {
        warn!(org_id = ctx.org_id, status = ctx.org_status_id, "Account disabled");
        return Err(ConsoleError::AccountDisabled);
    }
    Ok(())
}
