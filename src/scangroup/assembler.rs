use super::details::ScanGroupDetails;
use crate::models::{
    BruteModuleConfig, KeywordModuleConfig, ModuleConfiguration, NsModuleConfig, PortScanModuleConfig,
    WebModuleConfig,
};

pub const BRUTE_MAX_DEPTH: i32 = 2;
pub const WEB_MAX_LINKS: i32 = 10;

/// Wire validated details and a port policy into the full module configuration.
pub fn assemble(details: &ScanGroupDetails, port_module: PortScanModuleConfig) -> ModuleConfiguration {
    let rate = details.concurrent_requests;

    ModuleConfiguration {
        ns_module: NsModuleConfig { requests_per_second: rate },
        brute_module: BruteModuleConfig {
            custom_sub_names: details.custom_sub_names.clone(),
            requests_per_second: rate,
            max_depth: BRUTE_MAX_DEPTH,
        },
        port_module,
        web_module: WebModuleConfig {
            take_screenshots: true,
            requests_per_second: rate,
            max_links: WEB_MAX_LINKS,
            extract_js: true,
            fingerprint_frameworks: true,
        },
        // Keywords are not user-configurable yet.
        keyword_module: KeywordModuleConfig { keywords: vec![String::new()] },
    }
}
