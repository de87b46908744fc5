use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string", "minLength": 1 },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                }
            },
            "env": { "type": "string" },
            "region": { "type": "string" },
            "api_token": { "type": "string" },
            "backend": {
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": ["memory", "http"] },
                    "token": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1, "maximum": 300 },
                    "endpoints": {
                        "type": "object",
                        "properties": {
                            "scangroup": { "$ref": "#/$defs/url" },
                            "address": { "$ref": "#/$defs/url" },
                            "organization": { "$ref": "#/$defs/url" },
                            "user": { "$ref": "#/$defs/url" }
                        }
                    },
                    "retry": {
                        "type": "object",
                        "properties": {
                            "max_retries": { "type": "integer", "minimum": 0, "maximum": 10 },
                            "base_delay_ms": { "type": "integer", "minimum": 0 },
                            "max_delay_ms": { "type": "integer", "minimum": 0 }
                        }
                    }
                }
            },
            "limits": {
                "type": "object",
                "properties": {
                    "max_input_addresses": { "type": "integer", "minimum": 1 },
                    "max_body_bytes": { "type": "integer", "minimum": 1024 }
                }
            },
            "organizations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["org_id"],
                    "properties": {
                        "org_id": { "type": "integer" },
                        "subscription_id": { "type": "integer" },
                        "port_scan_enabled": { "type": "boolean" }
                    }
                }
            },
            "users": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["org_id", "user_cid"],
                    "properties": {
                        "org_id": { "type": "integer" },
                        "user_cid": { "type": "string" },
                        "agreement_accepted": { "type": "boolean" }
                    }
                }
            }
        },
        "$defs": {
            "url": { "type": "string", "pattern": "^https?://" }
        }
    })
});
