use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsModuleConfig {
    pub requests_per_second: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BruteModuleConfig {
    pub custom_sub_names: Vec<String>,
    pub requests_per_second: i32,
    pub max_depth: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortScanModuleConfig {
    pub requests_per_second: i32,
    pub port_scan_enabled: bool,
    pub custom_web_ports: Vec<i32>,
    pub tcp_ports: Vec<i32>,
    pub udp_ports: Vec<i32>,
    pub allowed_tlds: Vec<String>,
    pub allowed_hosts: Vec<String>,
    pub disallowed_tlds: Vec<String>,
    pub disallowed_hosts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebModuleConfig {
    pub take_screenshots: bool,
    pub requests_per_second: i32,
    pub max_links: i32,
    pub extract_js: bool,
    pub fingerprint_frameworks: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordModuleConfig {
    pub keywords: Vec<String>,
}

/// Per-module policy handed to the scanning workers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    pub ns_module: NsModuleConfig,
    pub brute_module: BruteModuleConfig,
    pub port_module: PortScanModuleConfig,
    pub web_module: WebModuleConfig,
    pub keyword_module: KeywordModuleConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanGroup {
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
    pub module_configurations: ModuleConfiguration,
    pub paused: bool,
    pub deleted: bool,
    pub last_paused_time: i64,
    pub archive_after_days: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub org_id: i32,
    pub group_id: i32,
    pub active_addresses: i32,
    pub batch_size: i32,
    pub last_updated: i64,
    pub batch_start: i64,
    pub batch_end: i64,
}

/// A scan group as returned to console users, without internal bookkeeping.
#[derive(Debug, Serialize)]
pub struct ScanGroupForUser<'a> {
    pub group_id: i32,
    pub group_name: &'a str,
    pub creation_time: i64,
    pub created_by: &'a str,
    pub modified_by: &'a str,
    pub modified_time: i64,
    pub module_configuration: &'a ModuleConfiguration,
    pub paused: bool,
    pub last_paused_time: i64,
    pub archive_after_days: i32,
}

impl<'a> From<&'a ScanGroup> for ScanGroupForUser<'a> {
    fn from(g: &'a ScanGroup) -> Self {
        Self {
            group_id: g.group_id,
            group_name: &g.group_name,
            creation_time: g.creation_time,
            created_by: &g.created_by,
            modified_by: &g.modified_by,
            modified_time: g.modified_time,
            module_configuration: &g.module_configurations,
            paused: g.paused,
            last_paused_time: g.last_paused_time,
            archive_after_days: g.archive_after_days,
        }
    }
}
