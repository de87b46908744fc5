use serde::{Deserialize, Serialize};

use crate::errors::RetryConfig;
use crate::models::{Organization, User};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Bearer token required on every console route. `$VAR` reads the environment.
    pub api_token: Option<String>,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Seed data for the memory backend.
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub users: Vec<User>,
}

fn default_env() -> String {
    "local".to_string()
}

fn default_region() -> String {
    "local".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    Http,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Http => "http",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown backend '{}', expected memory or http", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(rename = "type", default)]
    pub kind: BackendKind,
    pub endpoints: Option<EndpointsConfig>,
    /// Sent as a bearer token to every backend. `$VAR` reads the environment.
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            endpoints: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EndpointsConfig {
    pub scangroup: Option<String>,
    pub address: Option<String>,
    pub organization: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_input_addresses: usize,
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_addresses: crate::address::MAX_INPUT_ADDRESSES,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}
