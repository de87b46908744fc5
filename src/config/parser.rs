use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use super::credentials::resolve_credential;
use super::schema::CONFIG_SCHEMA;
use super::types::{BackendKind, ConsoleConfig};
use crate::errors::ConsoleError;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<ConsoleConfig, ConsoleError> {
    if !path.exists() {
        return Err(ConsoleError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ConsoleError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse, schema-check and semantically check a YAML config document.
pub fn parse_config_str(content: &str) -> Result<ConsoleConfig, ConsoleError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file is a valid all-defaults config.
    if yaml.is_null() {
        return Ok(ConsoleConfig::default());
    }

    validate_schema(&yaml)?;

    let mut config: ConsoleConfig = serde_yaml::from_value(yaml)?;
    validate_conflicts(&config)?;
    resolve_secrets(&mut config);

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ConsoleError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| ConsoleError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ConsoleError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        if !messages.is_empty() {
            return Err(ConsoleError::Config(messages.join("; ")));
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &ConsoleConfig) -> Result<(), ConsoleError> {
    if config.backend.kind == BackendKind::Http {
        let endpoints = config.backend.endpoints.clone().unwrap_or_default();
        let missing: Vec<&str> = [
            ("scangroup", &endpoints.scangroup),
            ("address", &endpoints.address),
            ("organization", &endpoints.organization),
            ("user", &endpoints.user),
        ]
        .iter()
        .filter(|(_, url)| url.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(ConsoleError::Config(format!(
                "http backend requires endpoints for: {}",
                missing.join(", ")
            )));
        }

        if !config.organizations.is_empty() || !config.users.is_empty() {
            warn!("Seed organizations and users are ignored by the http backend");
        }
    }

    let retry = &config.backend.retry;
    if retry.base_delay_ms > retry.max_delay_ms {
        return Err(ConsoleError::Config(format!(
            "backend.retry.base_delay_ms ({}) exceeds max_delay_ms ({})",
            retry.base_delay_ms, retry.max_delay_ms
        )));
    }

    let mut org_ids = HashSet::new();
    for org in &config.organizations {
        if !org_ids.insert(org.org_id) {
            return Err(ConsoleError::Config(format!("Duplicate organization id {}", org.org_id)));
        }
    }

    for user in &config.users {
        if !org_ids.contains(&user.org_id) {
            warn!(user_cid = %user.user_cid, org_id = user.org_id, "Seed user references an unknown organization");
        }
    }

    Ok(())
}

fn resolve_secrets(config: &mut ConsoleConfig) {
    if let Some(token) = config.api_token.as_mut() {
        *token = resolve_credential(token);
    }
    if let Some(token) = config.backend.token.as_mut() {
        *token = resolve_credential(token);
    }
}
