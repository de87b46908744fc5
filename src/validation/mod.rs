//! Field-level validation shared by request handlers.
//!
//! Structural limits come from `validator` derives on the request types;
//! named string predicates live in a [`RuleSet`] owned by whoever validates,
//! so there is no process-wide registration.

pub mod rules;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

pub use rules::valid_subdomain;

/// A named pure predicate over a single string value.
pub type Rule = fn(&str) -> bool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in one pass, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Fold in the errors reported by a `validator` derive.
    pub fn extend_from(&mut self, errors: &validator::ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            for e in errs.iter() {
                let message = match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{} failed {} validation", field, e.code),
                };
                self.push(FieldError::new(field.to_string(), e.code.to_string(), message));
            }
        }
    }

    pub fn into_result(mut self) -> Result<(), FieldErrors> {
        if self.0.is_empty() {
            return Ok(());
        }
        self.0.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        Err(self)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Rule table a validator instance consults for named string checks.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<&'static str, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str, rule: Rule) -> &mut Self {
        self.rules.insert(name, rule);
        self
    }

    /// Apply rule `name` to each value, recording `field[i]` for failures.
    /// An unregistered rule is itself reported so it can never pass silently.
    pub fn check_each(&self, name: &str, field: &str, values: &[String], errors: &mut FieldErrors) {
        let Some(rule) = self.rules.get(name) else {
            errors.push(FieldError::new(field, name, format!("validation rule '{}' is not registered", name)));
            return;
        };
        for (i, value) in values.iter().enumerate() {
            if !rule(value) {
                errors.push(FieldError::new(
                    format!("{}[{}]", field, i),
                    name,
                    format!("'{}' failed {} validation", value, name),
                ));
            }
        }
    }
}
