//! Error types produced by the validate crate.
//!
//! Validation stops at the first failing check class. Every variant names the
//! field(s) at fault so the operator can resend a corrected message.
//!
//! | Error | Check | Carries |
//! |-------|-------|---------|
//! | [`MissingFields`](ValidationError::MissingFields) | presence | every missing required field |
//! | [`InvalidValueKind`](ValidationError::InvalidValueKind) | kind | first field holding the wrong kind |
//! | [`InvalidEnumValue`](ValidationError::InvalidEnumValue) | enumeration | field, rejected value, allowed set |
//! | [`NumericInvariantViolation`](ValidationError::NumericInvariantViolation) | ordering | both operands |
//!
//! ```rust
//! use validate::ValidationError;
//!
//! let err = ValidationError::InvalidEnumValue {
//!     field: "severity",
//!     value: "Extreme".into(),
//!     allowed: &["Low", "Medium", "High"],
//! };
//! assert!(err.operator_message().contains("Low, Medium, High"));
//! ```

use records::{RecordType, ValueKind};
use thiserror::Error;

fn kind_name(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Text => "text",
        ValueKind::Number => "number",
        ValueKind::Date => "date (YYYY-MM-DD)",
    }
}

fn human(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("missing required field(s) for {record_type}: {}", .fields.join(", "))]
    MissingFields {
        record_type: RecordType,
        fields: Vec<&'static str>,
    },
    #[error("field `{field}` must be a {}", kind_name(.expected))]
    InvalidValueKind {
        field: &'static str,
        expected: ValueKind,
    },
    #[error("invalid value `{value}` for `{field}` (allowed: {})", .allowed.join(", "))]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
    #[error("`{start_field}` ({start}) is greater than `{end_field}` ({end})")]
    NumericInvariantViolation {
        start_field: &'static str,
        end_field: &'static str,
        start: f64,
        end: f64,
    },
}

impl ValidationError {
    /// Field names implicated by this failure.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::MissingFields { fields, .. } => fields.clone(),
            ValidationError::InvalidValueKind { field, .. }
            | ValidationError::InvalidEnumValue { field, .. } => vec![*field],
            ValidationError::NumericInvariantViolation {
                start_field,
                end_field,
                ..
            } => vec![*start_field, *end_field],
        }
    }

    /// Actionable text for the operator. Always names the offending field(s).
    pub fn operator_message(&self) -> String {
        match self {
            ValidationError::MissingFields {
                record_type,
                fields,
            } => {
                let names: Vec<String> = fields.iter().map(|f| human(f)).collect();
                format!(
                    "Missing required field(s) for {record_type}: {}. Please resend with these details.",
                    names.join(", ")
                )
            }
            ValidationError::InvalidValueKind { field, expected } => {
                format!("{} must be a {}.", human(field), kind_name(expected))
            }
            ValidationError::InvalidEnumValue {
                field,
                value,
                allowed,
            } => format!(
                "Invalid {} \"{value}\". Use one of: {}.",
                field.replace('_', " "),
                allowed.join(", ")
            ),
            ValidationError::NumericInvariantViolation {
                start_field,
                end_field,
                start,
                end,
            } => format!(
                "{} ({start}) is greater than {} ({end}). Please check the readings.",
                human(start_field),
                end_field.replace('_', " ")
            ),
        }
    }
}
