use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{valid_subdomain, FieldError, FieldErrors, RuleSet};

pub const MAX_PORT: i32 = 65535;
pub const MAX_SUB_NAME_CHARS: usize = 128;
pub const MAX_PORTS_PER_SECOND: i32 = 50;

/// Scan-group parameters as submitted by a console user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct ScanGroupDetails {
    #[validate(length(min = 1, max = 128, message = "group name must be between 1 and 128 characters"))]
    #[serde(default)]
    pub group_name: String,

    #[serde(default)]
    pub port_scan_enabled: bool,

    #[validate(length(max = 100, message = "at most 100 custom sub names are allowed"))]
    #[serde(default)]
    pub custom_sub_names: Vec<String>,

    #[validate(length(max = 10, message = "at most 10 custom web ports are allowed"))]
    #[serde(default)]
    pub custom_web_ports: Vec<i32>,

    #[validate(length(max = 50, message = "at most 50 tcp ports are allowed"))]
    #[serde(default)]
    pub tcp_ports: Vec<i32>,

    #[validate(length(max = 100, message = "at most 100 allowed TLDs are allowed"))]
    #[serde(default)]
    pub allowed_tlds: Vec<String>,

    #[validate(length(max = 5000, message = "at most 5000 allowed hosts are allowed"))]
    #[serde(default)]
    pub allowed_hosts: Vec<String>,

    #[validate(length(max = 100, message = "at most 100 disallowed TLDs are allowed"))]
    #[serde(default)]
    pub disallowed_tlds: Vec<String>,

    #[validate(length(max = 5000, message = "at most 5000 disallowed hosts are allowed"))]
    #[serde(default)]
    pub disallowed_hosts: Vec<String>,

    /// 0 means unset.
    #[serde(default)]
    pub ports_per_second: i32,

    #[validate(range(min = 1, max = 20, message = "concurrent requests must be between 1 and 20"))]
    #[serde(default)]
    pub concurrent_requests: i32,

    #[validate(range(min = 2, max = 14, message = "archive after days must be between 2 and 14"))]
    #[serde(default)]
    pub archive_after_days: i32,
}

/// Validator for [`ScanGroupDetails`]. Construct once, share by reference.
#[derive(Debug, Clone)]
pub struct DetailsValidator {
    rules: RuleSet,
}

impl Default for DetailsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailsValidator {
    pub fn new() -> Self {
        let mut rules = RuleSet::new();
        rules.register("subdomain", valid_subdomain);
        Self { rules }
    }

    /// Check every field and report all violations together.
    pub fn validate(&self, details: &ScanGroupDetails) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Err(e) = details.validate() {
            errors.extend_from(&e);
        }

        if details.group_name.contains('/') {
            errors.push(FieldError::new(
                "group_name",
                "excludesall",
                "'/' is not allowed in the group name",
            ));
        }

        for (i, name) in details.custom_sub_names.iter().enumerate() {
            let len = name.chars().count();
            if len == 0 || len > MAX_SUB_NAME_CHARS {
                errors.push(FieldError::new(
                    format!("custom_sub_names[{}]", i),
                    "length",
                    "custom sub names must be between 1 and 128 characters",
                ));
            }
        }
        self.rules.check_each("subdomain", "custom_sub_names", &details.custom_sub_names, &mut errors);

        check_ports("custom_web_ports", &details.custom_web_ports, &mut errors);
        check_ports("tcp_ports", &details.tcp_ports, &mut errors);

        if details.ports_per_second != 0
            && !(1..=MAX_PORTS_PER_SECOND).contains(&details.ports_per_second)
        {
            errors.push(FieldError::new(
                "ports_per_second",
                "range",
                "ports per second must be between 1 and 50",
            ));
        }

        errors.into_result()
    }
}

fn check_ports(field: &str, ports: &[i32], errors: &mut FieldErrors) {
    for (i, port) in ports.iter().enumerate() {
        if !(1..=MAX_PORT).contains(port) {
            errors.push(FieldError::new(
                format!("{}[{}]", field, i),
                "range",
                format!("port {} is outside 1-65535", port),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scangroup::fixtures::valid_details;

    #[test]
    fn test_valid_details_pass() {
        let validator = DetailsValidator::new();
        assert!(validator.validate(&valid_details()).is_ok());
    }

    #[test]
    fn test_all_violations_reported_together() {
        let validator = DetailsValidator::new();
        let details = ScanGroupDetails {
            group_name: "test/".to_string(),
            custom_sub_names: vec![
                "ok".into(),
                "日本".into(),
                ")@#asdbadf".into(),
                "bad.bad".into(),
                "bad,".into(),
            ],
            concurrent_requests: 100,
            tcp_ports: vec![1, 65535, 90000, 0],
            archive_after_days: 5,
            ..Default::default()
        };

        let errors = validator.validate(&details).unwrap_err();
        assert!(errors.has_field("group_name"));
        assert!(!errors.has_field("custom_sub_names[0]"));
        assert!(!errors.has_field("custom_sub_names[1]"));
        assert!(errors.has_field("custom_sub_names[2]"));
        assert!(errors.has_field("custom_sub_names[3]"));
        assert!(errors.has_field("custom_sub_names[4]"));
        assert!(!errors.has_field("tcp_ports[0]"));
        assert!(!errors.has_field("tcp_ports[1]"));
        assert!(errors.has_field("tcp_ports[2]"));
        assert!(errors.has_field("tcp_ports[3]"));
        assert!(errors.has_field("concurrent_requests"));
    }

    #[test]
    fn test_slash_in_group_name_has_distinct_message() {
        let validator = DetailsValidator::new();
        let details = ScanGroupDetails { group_name: "foo/bar".to_string(), ..valid_details() };
        let errors = validator.validate(&details).unwrap_err();
        assert!(errors.iter().any(|e| e.message == "'/' is not allowed in the group name"));
    }

    #[test]
    fn test_required_fields_missing() {
        let validator = DetailsValidator::new();
        let details: ScanGroupDetails = serde_json::from_str(r#"{"group_name":"g"}"#).unwrap();
        let errors = validator.validate(&details).unwrap_err();
        assert!(errors.has_field("concurrent_requests"));
        assert!(errors.has_field("archive_after_days"));
    }

    #[test]
    fn test_group_name_length_counts_chars() {
        let validator = DetailsValidator::new();
        let details = ScanGroupDetails { group_name: "日".repeat(128), ..valid_details() };
        assert!(validator.validate(&details).is_ok());

        let details = ScanGroupDetails { group_name: "a".repeat(129), ..valid_details() };
        assert!(validator.validate(&details).unwrap_err().has_field("group_name"));
    }

    #[test]
    fn test_list_size_limits() {
        let validator = DetailsValidator::new();
        let details = ScanGroupDetails {
            custom_web_ports: (1..=11).collect(),
            allowed_hosts: vec!["h".to_string(); 5001],
            ..valid_details()
        };
        let errors = validator.validate(&details).unwrap_err();
        assert!(errors.has_field("custom_web_ports"));
        assert!(errors.has_field("allowed_hosts"));
    }

    #[test]
    fn test_ports_per_second_zero_or_bounded() {
        let validator = DetailsValidator::new();
        assert!(validator.validate(&ScanGroupDetails { ports_per_second: 0, ..valid_details() }).is_ok());
        assert!(validator.validate(&ScanGroupDetails { ports_per_second: 50, ..valid_details() }).is_ok());
        let errors = validator
            .validate(&ScanGroupDetails { ports_per_second: 51, ..valid_details() })
            .unwrap_err();
        assert!(errors.has_field("ports_per_second"));
    }

    #[test]
    fn test_archive_after_days_bounds() {
        let validator = DetailsValidator::new();
        assert!(validator.validate(&ScanGroupDetails { archive_after_days: 2, ..valid_details() }).is_ok());
        assert!(validator.validate(&ScanGroupDetails { archive_after_days: 14, ..valid_details() }).is_ok());
        assert!(validator.validate(&ScanGroupDetails { archive_after_days: 15, ..valid_details() }).is_err());
    }

    #[test]
    fn test_empty_sub_name_rejected() {
        let validator = DetailsValidator::new();
        let details = ScanGroupDetails { custom_sub_names: vec![String::new()], ..valid_details() };
        assert!(validator.validate(&details).unwrap_err().has_field("custom_sub_names[0]"));
    }
}
