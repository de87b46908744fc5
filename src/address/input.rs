use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::ScanGroupAddress;

pub const MAX_INPUT_ADDRESSES: usize = 100_000;
pub const INPUT_LIST_SOURCE: &str = "input_list";

const MAX_HOST_LEN: usize = 253;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?$").expect("hostname label pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub line: usize,
    pub error: String,
}

impl ParseError {
    fn new(line: usize, error: impl Into<String>) -> Self {
        Self { line, error: error.into() }
    }
}

/// Parse a newline separated address list into a set of normalized entries.
///
/// Blank lines and `#` comments are skipped. Every bad line is reported;
/// callers should reject the whole upload when any error is returned.
pub fn parse_list(input: &str, max_addresses: usize) -> (BTreeSet<String>, Vec<ParseError>) {
    let mut addrs = BTreeSet::new();
    let mut errors = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match normalize(trimmed) {
            Ok(addr) => {
                if addrs.contains(&addr) {
                    continue;
                }
                if addrs.len() >= max_addresses {
                    errors.push(ParseError::new(
                        line,
                        format!("maximum number of addresses exceeded ({})", max_addresses),
                    ));
                    break;
                }
                addrs.insert(addr);
            }
            Err(e) => errors.push(ParseError::new(line, e)),
        }
    }

    (addrs, errors)
}

/// Reduce one entry to a bare lowercase host or IP literal.
pub fn normalize(entry: &str) -> Result<String, String> {
    let lower = entry.to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);

    if without_scheme.contains("://") {
        return Err(format!("unsupported scheme in {}", entry));
    }

    if without_scheme.parse::<IpAddr>().is_ok() {
        return Ok(without_scheme.to_string());
    }

    let authority = without_scheme.split('/').next().unwrap_or_default();
    let host = strip_port(authority);
    let host = host.strip_suffix('.').unwrap_or(host);

    if host.is_empty() {
        return Err(format!("no host found in {}", entry));
    }
    if let Some(ip) = bracketed_ip(host) {
        return Ok(ip);
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    if !is_hostname(host) {
        return Err(format!("invalid host or ip address: {}", entry));
    }
    Ok(host.to_string())
}

fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

fn bracketed_ip(host: &str) -> Option<String> {
    let inner = host.strip_prefix('[')?.strip_suffix(']')?;
    inner.parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

pub fn is_hostname(host: &str) -> bool {
    if host.len() > MAX_HOST_LEN {
        return false;
    }
    let labels: Vec<&str> = host.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| LABEL_RE.is_match(l))
}

pub fn is_ip(addr: &str) -> bool {
    addr.parse::<IpAddr>().is_ok()
}

/// Stable identity of an address within a group.
pub fn hash_address(ip_address: &str, host_address: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip_address.as_bytes());
    hasher.update(host_address.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Turn parsed entries into address records keyed by their hash.
pub fn make_addrs(
    input: &BTreeSet<String>,
    org_id: i32,
    group_id: i32,
    now: i64,
) -> HashMap<String, ScanGroupAddress> {
    let mut addrs = HashMap::with_capacity(input.len());
    for entry in input {
        let mut addr = ScanGroupAddress {
            org_id,
            group_id,
            discovered_by: INPUT_LIST_SOURCE.to_string(),
            discovery_time: now,
            confidence_score: 100.0,
            user_confidence_score: 0.0,
            ..Default::default()
        };
        if is_ip(entry) {
            addr.ip_address = entry.clone();
        } else {
            addr.host_address = entry.clone();
        }
        addr.address_hash = hash_address(&addr.ip_address, &addr.host_address);
        addrs.insert(addr.address_hash.clone(), addr);
    }
    addrs
}
