use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension, Json,
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::api::context::ensure_enabled;
use crate::api::models::{GroupCreatedResponse, GroupStatsResponse, GroupStatusRequest, StatusResponse};
use crate::api::AppState;
use crate::errors::ConsoleError;
use crate::models::{ScanGroupForUser, UserContext};
use crate::scangroup::{self, quota, ScanGroupDetails};

const SLASH_IN_NAME: &str = "'/' is not allowed in the group name";

fn parse_group_id(raw: &str) -> Result<i32, ConsoleError> {
    raw.parse().map_err(|_| ConsoleError::InvalidParameter("invalid parameter".into()))
}

fn parse_body<T: DeserializeOwned>(body: &Bytes, what: &str) -> Result<T, ConsoleError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Failed to parse request body");
        ConsoleError::BadRequest(format!("error reading {}", what))
    })
}

/// Whether the caller's org may run port scans. Lookup failures disable the feature.
async fn org_port_scan_enabled(state: &AppState, ctx: &UserContext) -> bool {
    match state.organizations.get(ctx).await.and_then(|org| org.for_org(ctx)) {
        Ok(org) => org.port_scan_enabled,
        Err(e) => {
            warn!(error = %e, "Unable to retrieve organization for checking features");
            false
        }
    }
}

pub async fn get_group_stats(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
) -> Result<Json<GroupStatsResponse>, ConsoleError> {
    let group_stats = state.scan_groups.group_stats(&ctx).await?.for_org(&ctx)?;
    Ok(Json(GroupStatsResponse { status: "OK", group_stats }))
}

pub async fn list_groups(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
) -> Result<Json<serde_json::Value>, ConsoleError> {
    let groups = state.scan_groups.groups(&ctx).await?.for_org(&ctx)?;
    let for_user: Vec<ScanGroupForUser> = groups.iter().map(ScanGroupForUser::from).collect();
    Ok(Json(serde_json::to_value(for_user)?))
}

pub async fn get_group_by_id(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ConsoleError> {
    let group_id = parse_group_id(&id)?;
    let group = state.scan_groups.get(&ctx, group_id).await?.for_org(&ctx)?;
    Ok(Json(serde_json::to_value(ScanGroupForUser::from(&group))?))
}

pub async fn get_group_by_name(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ConsoleError> {
    let group = state.scan_groups.get_by_name(&ctx, &name).await?.for_org(&ctx)?;
    Ok(Json(serde_json::to_value(ScanGroupForUser::from(&group))?))
}

pub async fn create_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<GroupCreatedResponse>, ConsoleError> {
    ensure_enabled(&ctx)?;

    let user = state
        .users
        .get(&ctx)
        .await
        .and_then(|u| u.for_org(&ctx))
        .map_err(|e| {
            error!(error = %e, "Failed to get user details");
            ConsoleError::Internal("unable to retrieve user details".into())
        })?;
    if !user.agreement_accepted {
        warn!("User has not accepted agreement");
        return Err(ConsoleError::Unauthorized(
            "user has not accepted agreement, unable to create scan group.".into(),
        ));
    }

    let port_scan_enabled = org_port_scan_enabled(&state, &ctx).await;

    if name.contains('/') {
        return Err(ConsoleError::BadRequest(SLASH_IN_NAME.into()));
    }

    match state.scan_groups.get_by_name(&ctx, &name).await {
        Ok(_) => return Err(ConsoleError::Conflict("group name already exists".into())),
        Err(ConsoleError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }

    // Count lookup only for limited tiers. The count can be stale by the
    // time the backend creates the group.
    if quota::group_limit(ctx.subscription).is_some() {
        let existing = state.scan_groups.count(&ctx).await?.for_org(&ctx)?;
        quota::check_quota(ctx.subscription, existing)?;
    }

    let details: ScanGroupDetails = parse_body(&body, "scangroup")?;
    let modules = scangroup::build_module_configuration(&state.validator, &details, port_scan_enabled)
        .inspect_err(|e| warn!(error = %e, "Invalid scan group details"))?;

    let now = scangroup::now_nanos();
    let group = scangroup::new_scan_group(&ctx, &details.group_name, &details, modules, now);
    let group_id = state.scan_groups.create(&ctx, group).await?.for_org(&ctx)?;

    info!(group_id, group_name = %details.group_name, "Created scan group");
    Ok(Json(GroupCreatedResponse {
        status: "OK",
        group_id,
        upload_address_uri: format!("/address/{}/initial", group_id),
    }))
}

pub async fn update_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ConsoleError> {
    ensure_enabled(&ctx)?;

    let mut group = state.scan_groups.get_by_name(&ctx, &name).await?.for_org(&ctx)?;
    let port_scan_enabled = org_port_scan_enabled(&state, &ctx).await;

    let details: ScanGroupDetails = parse_body(&body, "group")?;
    let modules = scangroup::build_module_configuration(&state.validator, &details, port_scan_enabled)
        .inspect_err(|e| warn!(error = %e, "Invalid scan group details"))?;

    group.group_name = details.group_name.clone();
    scangroup::apply_update(&mut group, &ctx, &details, modules, scangroup::now_nanos());
    let group_id = state.scan_groups.update(&ctx, group).await?.for_org(&ctx)?;

    info!(group_id, "Updated scan group");
    Ok(Json(StatusResponse::ok("group updated")))
}

pub async fn delete_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(name): Path<String>,
) -> Result<Json<StatusResponse>, ConsoleError> {
    ensure_enabled(&ctx)?;
    quota::check_delete(ctx.subscription)?;

    let group = state.scan_groups.get_by_name(&ctx, &name).await?.for_org(&ctx)?;
    let group_id = state.scan_groups.delete(&ctx, group.group_id).await?.for_org(&ctx)?;

    info!(group_id, "Deleted scan group");
    Ok(Json(StatusResponse::ok("OK")))
}

pub async fn update_group_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ConsoleError> {
    ensure_enabled(&ctx)?;

    let group = state.scan_groups.get_by_name(&ctx, &name).await?.for_org(&ctx)?;
    let request: GroupStatusRequest = parse_body(&body, "status")?;

    let result = match request.status.as_str() {
        "pause" => state.scan_groups.pause(&ctx, group.group_id).await,
        "resume" => state.scan_groups.resume(&ctx, group.group_id).await,
        _ => {
            return Err(ConsoleError::BadRequest(
                "unknown status supplied, must be pause or resume".into(),
            ))
        }
    };
    result?.for_org(&ctx)?;

    info!(group_id = group.group_id, status = %request.status, "Updated scan group status");
    Ok(Json(StatusResponse::ok("OK")))
}
