use std::collections::BTreeSet;

use thiserror::Error;

use super::details::ScanGroupDetails;
use crate::models::PortScanModuleConfig;

pub const DEFAULT_PORTS_PER_SECOND: i32 = 5;

/// Always scanned over TCP, whether or not the caller listed them.
pub const IMPLICIT_TCP_PORTS: [i32; 2] = [80, 443];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortPolicyError {
    #[error("not all web ports exist in tcp ports")]
    WebPortsNotInTcp(Vec<i32>),

    #[error("you have not specified any allowed hosts or TLDs")]
    NoAllowList,
}

/// Deduplicate both port lists, add the implicit TCP ports, then require
/// every web port to be a TCP port. Returns `(web, tcp)` in ascending order.
pub fn verify_web_scan_ports(web_ports: &[i32], tcp_ports: &[i32]) -> Result<(Vec<i32>, Vec<i32>), PortPolicyError> {
    let web: BTreeSet<i32> = web_ports.iter().copied().collect();
    let mut tcp: BTreeSet<i32> = tcp_ports.iter().copied().collect();
    tcp.extend(IMPLICIT_TCP_PORTS);

    let missing: Vec<i32> = web.difference(&tcp).copied().collect();
    if !missing.is_empty() {
        return Err(PortPolicyError::WebPortsNotInTcp(missing));
    }

    Ok((web.into_iter().collect(), tcp.into_iter().collect()))
}

/// Full port-scan policy for an entitled org that asked for port scanning.
pub fn build_port_config(details: &ScanGroupDetails) -> Result<PortScanModuleConfig, PortPolicyError> {
    let pps = if details.ports_per_second == 0 {
        DEFAULT_PORTS_PER_SECOND
    } else {
        details.ports_per_second
    };

    let (web, tcp) = verify_web_scan_ports(&details.custom_web_ports, &details.tcp_ports)?;

    if details.allowed_tlds.is_empty() && details.allowed_hosts.is_empty() {
        return Err(PortPolicyError::NoAllowList);
    }

    Ok(PortScanModuleConfig {
        requests_per_second: pps,
        port_scan_enabled: details.port_scan_enabled,
        custom_web_ports: web,
        tcp_ports: tcp,
        udp_ports: Vec::new(),
        allowed_tlds: details.allowed_tlds.clone(),
        allowed_hosts: details.allowed_hosts.clone(),
        disallowed_tlds: details.disallowed_tlds.clone(),
        disallowed_hosts: details.disallowed_hosts.clone(),
    })
}

/// Port module for orgs without the entitlement, or callers that opted out.
pub fn disabled_port_config(details: &ScanGroupDetails) -> PortScanModuleConfig {
    PortScanModuleConfig {
        requests_per_second: details.concurrent_requests,
        port_scan_enabled: false,
        custom_web_ports: details.custom_web_ports.clone(),
        ..Default::default()
    }
}

/// Pick the full or the disabled policy. Port-specific checks only run for
/// the full one.
pub fn port_config_for(details: &ScanGroupDetails, org_port_scan_enabled: bool) -> Result<PortScanModuleConfig, PortPolicyError> {
    if org_port_scan_enabled && details.port_scan_enabled {
        build_port_config(details)
    } else {
        Ok(disabled_port_config(details))
    }
}
