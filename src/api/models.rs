use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::address::ParseError;
use crate::models::{GroupStats, ScanGroupAddress};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub msg: String,
}

impl StatusResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self { status: "OK", msg: msg.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupCreatedResponse {
    pub status: &'static str,
    pub group_id: i32,
    pub upload_address_uri: String,
}

#[derive(Debug, Serialize)]
pub struct GroupStatsResponse {
    pub status: &'static str,
    pub group_stats: HashMap<i32, GroupStats>,
}

#[derive(Debug, Deserialize)]
pub struct GroupStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub status: &'static str,
    pub last_index: i64,
    pub addresses: Vec<ScanGroupAddress>,
}

#[derive(Debug, Serialize)]
pub struct PutAddressResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ParseError>,
    #[serde(skip_serializing_if = "is_zero")]
    pub count: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub status: &'static str,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddressIdsRequest {
    pub address_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct IgnoreAddressesRequest {
    pub address_ids: Vec<i64>,
    pub ignore_value: bool,
}
