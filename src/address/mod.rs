//! Address-set handling: query filters, input-list parsing and host aggregation.

pub mod filter;
pub mod input;

use std::collections::BTreeMap;

use crate::models::{ScanGroupAddress, ScanGroupHostList};

pub use filter::parse_filter_query;
pub use input::{make_addrs, parse_list, ParseError, MAX_INPUT_ADDRESSES};

/// Last two labels of a host name, or the host itself when shorter.
pub fn etld_plus_one(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host.to_string();
    }
    labels[labels.len() - 2..].join(".")
}

/// Group addresses by host name, collecting ids and distinct IPs.
/// Addresses without a host name are left out.
pub fn aggregate_hosts(addrs: &[ScanGroupAddress]) -> Vec<ScanGroupHostList> {
    let mut hosts: BTreeMap<&str, ScanGroupHostList> = BTreeMap::new();

    for addr in addrs.iter().filter(|a| !a.deleted && !a.host_address.is_empty()) {
        let entry = hosts.entry(addr.host_address.as_str()).or_insert_with(|| ScanGroupHostList {
            org_id: addr.org_id,
            group_id: addr.group_id,
            etld: etld_plus_one(&addr.host_address),
            host_address: addr.host_address.clone(),
            ..Default::default()
        });
        entry.address_ids.push(addr.address_id);
        if !addr.ip_address.is_empty() && !entry.ip_addresses.contains(&addr.ip_address) {
            entry.ip_addresses.push(addr.ip_address.clone());
        }
    }

    hosts.into_values().collect()
}
