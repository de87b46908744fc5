//! JSON shapes exchanged with the backend services.
//!
//! Nested module configurations are optional on the wire; an absent module
//! decodes to its default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    BruteModuleConfig, GroupStats, KeywordModuleConfig, NsModuleConfig, Organization, PortScanModuleConfig,
    ScanGroupAddress, ScanGroupAddressFilter, ScanGroupHostList, User, WebModuleConfig,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireUserContext {
    pub trace_id: String,
    pub org_id: i32,
    pub org_cid: String,
    pub user_id: i32,
    pub user_cid: String,
    pub roles: Vec<String>,
    pub ip_address: String,
    pub subscription_id: i32,
    pub org_status_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireModuleConfiguration {
    pub ns_module: Option<NsModuleConfig>,
    pub brute_module: Option<BruteModuleConfig>,
    pub port_module: Option<PortScanModuleConfig>,
    pub web_module: Option<WebModuleConfig>,
    pub keyword_module: Option<KeywordModuleConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireScanGroup {
    pub org_id: i32,
    pub group_id: i32,
    pub group_name: String,
    pub creation_time: i64,
    pub created_by: String,
    pub created_by_id: i32,
    pub modified_by: String,
    pub modified_by_id: i32,
    pub modified_time: i64,
    pub original_input_s3_url: String,
    pub module_configurations: Option<WireModuleConfiguration>,
    pub paused: bool,
    pub deleted: bool,
    pub last_paused_time: i64,
    pub archive_after_days: i32,
}

// Requests

#[derive(Debug, Serialize)]
pub struct ContextRequest {
    pub user_context: WireUserContext,
}

#[derive(Debug, Serialize)]
pub struct GroupIdRequest {
    pub user_context: WireUserContext,
    pub group_id: i32,
}

#[derive(Debug, Serialize)]
pub struct GroupNameRequest {
    pub user_context: WireUserContext,
    pub group_name: String,
}

#[derive(Debug, Serialize)]
pub struct GroupRequest {
    pub user_context: WireUserContext,
    pub group: WireScanGroup,
}

#[derive(Debug, Serialize)]
pub struct AddressFilterRequest {
    pub user_context: WireUserContext,
    pub filter: ScanGroupAddressFilter,
}

#[derive(Debug, Serialize)]
pub struct AddressUpdateRequest {
    pub user_context: WireUserContext,
    pub address: HashMap<String, ScanGroupAddress>,
}

#[derive(Debug, Serialize)]
pub struct AddressIdsRequest {
    pub user_context: WireUserContext,
    pub group_id: i32,
    pub address_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_value: Option<bool>,
}

// Responses. Each carries the org id the backend resolved for the caller.

#[derive(Debug, Deserialize)]
pub struct GroupResponse {
    pub org_id: i32,
    pub group: Option<WireScanGroup>,
}

#[derive(Debug, Deserialize)]
pub struct GroupsResponse {
    pub org_id: i32,
    #[serde(default)]
    pub groups: Vec<WireScanGroup>,
}

#[derive(Debug, Deserialize)]
pub struct GroupIdResponse {
    pub org_id: i32,
    pub group_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct GroupStatsResponse {
    pub org_id: i32,
    #[serde(default)]
    pub group_stats: HashMap<i32, GroupStats>,
}

#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub org_id: i32,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddressesResponse {
    pub org_id: i32,
    #[serde(default)]
    pub addresses: Vec<ScanGroupAddress>,
}

#[derive(Debug, Deserialize)]
pub struct HostListResponse {
    pub org_id: i32,
    #[serde(default)]
    pub host_list: Vec<ScanGroupHostList>,
}

#[derive(Debug, Deserialize)]
pub struct AckResponse {
    pub org_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationResponse {
    pub org_id: i32,
    pub org: Option<Organization>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub org_id: i32,
    pub user: Option<User>,
}
