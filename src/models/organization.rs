use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub org_id: i32,
    pub org_cid: String,
    pub org_name: String,
    pub owner_email: String,
    pub status_id: i32,
    pub subscription_id: i32,
    pub creation_time: i64,
    pub deleted: bool,
    pub limit_tld: i32,
    pub limit_hosts: i32,
    /// Feature entitlement gating the port-scan module.
    pub port_scan_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub org_id: i32,
    pub org_cid: String,
    pub user_cid: String,
    pub user_id: i32,
    pub user_email: String,
    pub first_name: String,
    pub last_name: String,
    pub status_id: i32,
    pub creation_time: i64,
    pub deleted: bool,
    pub agreement_accepted: bool,
    pub agreement_accepted_timestamp: i64,
    pub last_login_timestamp: i64,
}
