use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use tracing::{info, warn};

use crate::address::{self, parse_filter_query};
use crate::api::context::ensure_enabled;
use crate::api::models::{
    AddressIdsRequest, AddressResponse, CountResponse, IgnoreAddressesRequest, PutAddressResponse, StatusResponse,
};
use crate::api::AppState;
use crate::errors::ConsoleError;
use crate::models::{ScanGroupAddressFilter, UserContext};
use crate::scangroup::now_nanos;

fn parse_group_id(raw: &str) -> Result<i32, ConsoleError> {
    raw.parse()
        .map_err(|_| ConsoleError::InvalidParameter("invalid scangroup id supplied".into()))
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, ConsoleError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Failed to parse request body");
        ConsoleError::BadRequest("error reading request".into())
    })
}

pub async fn get_addresses(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<AddressResponse>, ConsoleError> {
    let group_id = parse_group_id(&id)?;
    let filter = parse_filter_query(&query, ctx.org_id, group_id)?;

    let addrs = state.addresses.get(&ctx, &filter).await?.for_org(&ctx)?;
    if let Some(bad) = addrs.iter().find(|a| a.org_id != ctx.org_id) {
        return Err(ConsoleError::OrgMismatch { expected: ctx.org_id, actual: bad.org_id });
    }

    let last_index = addrs.iter().map(|a| a.address_id).max().unwrap_or_default();
    Ok(Json(AddressResponse { status: "ok", last_index, addresses: addrs }))
}

pub async fn get_host_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ConsoleError> {
    let group_id = parse_group_id(&id)?;
    let filter = parse_filter_query(&query, ctx.org_id, group_id)?;

    let hosts = state.addresses.get_host_list(&ctx, &filter).await?.for_org(&ctx)?;
    Ok(Json(json!({"status": "ok", "hosts": hosts})))
}

pub async fn put_initial_addresses(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ConsoleError> {
    ensure_enabled(&ctx)?;
    let group_id = parse_group_id(&id)?;

    let input = String::from_utf8_lossy(&body);
    let (entries, errors) = address::parse_list(&input, state.limits.max_input_addresses);
    if !errors.is_empty() {
        warn!(group_id, errors = errors.len(), "Rejected address list");
        let resp = PutAddressResponse { status: "NG", errors, count: 0 };
        return Ok((StatusCode::BAD_REQUEST, Json(resp)).into_response());
    }

    let addrs = address::make_addrs(&entries, ctx.org_id, group_id, now_nanos());
    let count = state.addresses.update(&ctx, addrs).await?.for_org(&ctx)?;

    info!(group_id, count, "Stored initial addresses");
    Ok(Json(PutAddressResponse { status: "OK", errors: Vec::new(), count }).into_response())
}

pub async fn get_group_count(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<CountResponse>, ConsoleError> {
    let group_id = parse_group_id(&id)?;
    let count = state.addresses.count(&ctx, group_id).await?.for_org(&ctx)?;
    Ok(Json(CountResponse { status: "OK", count }))
}

pub async fn export_addresses(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Response, ConsoleError> {
    let group_id = parse_group_id(&id)?;
    let filter = ScanGroupAddressFilter { org_id: ctx.org_id, group_id, ..Default::default() };

    let addrs = state.addresses.get(&ctx, &filter).await?.for_org(&ctx)?;
    let data = serde_json::to_vec(&addrs)?;
    let disposition = format!("attachment; filename=\"addresses_{}.json\"", group_id);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

pub async fn delete_addresses(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ConsoleError> {
    ensure_enabled(&ctx)?;
    let group_id = parse_group_id(&id)?;
    let request: AddressIdsRequest = parse_json(&body)?;

    state.addresses.delete(&ctx, group_id, &request.address_ids).await?.for_org(&ctx)?;
    info!(group_id, count = request.address_ids.len(), "Deleted addresses");
    Ok(Json(StatusResponse::ok("OK")))
}

pub async fn ignore_addresses(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ConsoleError> {
    ensure_enabled(&ctx)?;
    let group_id = parse_group_id(&id)?;
    let request: IgnoreAddressesRequest = parse_json(&body)?;

    state
        .addresses
        .ignore(&ctx, group_id, &request.address_ids, request.ignore_value)
        .await?
        .for_org(&ctx)?;
    info!(group_id, ignore = request.ignore_value, "Updated ignored addresses");
    Ok(Json(StatusResponse::ok("OK")))
}
