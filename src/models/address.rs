use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanGroupAddress {
    pub address_id: i64,
    pub org_id: i32,
    pub group_id: i32,
    pub host_address: String,
    pub ip_address: String,
    pub discovery_time: i64,
    pub discovered_by: String,
    pub last_scanned_time: i64,
    pub last_seen_time: i64,
    pub confidence_score: f32,
    pub user_confidence_score: f32,
    pub is_soa: bool,
    pub is_wildcard_zone: bool,
    pub is_hosted_service: bool,
    pub ignored: bool,
    pub found_from: String,
    pub ns_record: i32,
    pub address_hash: String,
    pub deleted: bool,
}

/// Hosts grouped with every address id and IP that resolves to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanGroupHostList {
    pub org_id: i32,
    pub group_id: i32,
    pub etld: String,
    pub host_address: String,
    pub address_ids: Vec<i64>,
    pub ip_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanGroupAddressFilter {
    pub org_id: i32,
    pub group_id: i32,
    pub with_ignored: bool,
    pub ignored_value: bool,
    pub with_last_scanned_time: bool,
    pub since_scanned_time: i64,
    pub with_last_seen_time: bool,
    pub since_seen_time: i64,
    pub start: i64,
    pub limit: i32,
}

impl ScanGroupAddressFilter {
    /// True when `addr` passes every enabled criterion (paging excluded).
    pub fn matches(&self, addr: &ScanGroupAddress) -> bool {
        if addr.org_id != self.org_id || addr.group_id != self.group_id || addr.deleted {
            return false;
        }
        if self.with_ignored && addr.ignored != self.ignored_value {
            return false;
        }
        if self.with_last_scanned_time && addr.last_scanned_time < self.since_scanned_time {
            return false;
        }
        if self.with_last_seen_time && addr.last_seen_time < self.since_seen_time {
            return false;
        }
        addr.address_id > self.start
    }
}
