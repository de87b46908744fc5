use std::collections::HashMap;

use crate::errors::ConsoleError;
use crate::models::ScanGroupAddressFilter;

pub const MAX_LIMIT: i32 = 1000;

/// Build an address filter from request query parameters.
///
/// `ignored` only filters when it is exactly `true` or `false`. Numeric
/// parameters that fail to parse reject the request.
pub fn parse_filter_query(
    query: &HashMap<String, String>,
    org_id: i32,
    group_id: i32,
) -> Result<ScanGroupAddressFilter, ConsoleError> {
    let mut filter = ScanGroupAddressFilter { org_id, group_id, ..Default::default() };

    match query.get("ignored").map(String::as_str) {
        Some("true") => {
            filter.with_ignored = true;
            filter.ignored_value = true;
        }
        Some("false") => {
            filter.with_ignored = true;
            filter.ignored_value = false;
        }
        _ => {}
    }

    if let Some(v) = non_empty(query, "since_scanned") {
        filter.with_last_scanned_time = true;
        filter.since_scanned_time = parse_num(v)?;
    }

    if let Some(v) = non_empty(query, "since_seen") {
        filter.with_last_seen_time = true;
        filter.since_seen_time = parse_num(v)?;
    }

    if let Some(v) = non_empty(query, "start") {
        filter.start = parse_num(v)?;
    }

    if let Some(v) = non_empty(query, "limit") {
        filter.limit = parse_num(v)?;
        if filter.limit > MAX_LIMIT {
            return Err(ConsoleError::InvalidParameter(format!("limit max size exceeded ({})", MAX_LIMIT)));
        }
    }

    Ok(filter)
}

fn non_empty<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn parse_num<T: std::str::FromStr>(value: &str) -> Result<T, ConsoleError> {
    value
        .parse()
        .map_err(|_| ConsoleError::InvalidParameter("invalid parameters supplied".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_empty_query_defaults() {
        let filter = parse_filter_query(&HashMap::new(), 1, 2).unwrap();
        assert_eq!(filter.org_id, 1);
        assert_eq!(filter.group_id, 2);
        assert!(!filter.with_ignored);
        assert_eq!(filter.start, 0);
        assert_eq!(filter.limit, 0);
    }

    #[test]
    fn test_ignored_values() {
        let f = parse_filter_query(&query(&[("ignored", "true")]), 1, 2).unwrap();
        assert!(f.with_ignored && f.ignored_value);

        let f = parse_filter_query(&query(&[("ignored", "false")]), 1, 2).unwrap();
        assert!(f.with_ignored && !f.ignored_value);

        let f = parse_filter_query(&query(&[("ignored", "maybe")]), 1, 2).unwrap();
        assert!(!f.with_ignored);
    }

    #[test]
    fn test_time_filters() {
        let f = parse_filter_query(&query(&[("since_scanned", "100"), ("since_seen", "200")]), 1, 2).unwrap();
        assert!(f.with_last_scanned_time);
        assert_eq!(f.since_scanned_time, 100);
        assert!(f.with_last_seen_time);
        assert_eq!(f.since_seen_time, 200);
    }

    #[test]
    fn test_limit_max() {
        assert_eq!(parse_filter_query(&query(&[("limit", "1000")]), 1, 2).unwrap().limit, 1000);
        let err = parse_filter_query(&query(&[("limit", "1001")]), 1, 2).unwrap_err();
        assert_eq!(err.to_string(), "limit max size exceeded (1000)");
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = parse_filter_query(&query(&[("start", "abc")]), 1, 2).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidParameter(_)));
    }
}
