//! Opslog record validator.
//!
//! [`validate`] is the gate between correction and storage. It never repairs
//! anything; a record either satisfies its schema and comes back as a
//! [`ValidatedRecord`], or the first failing check class is reported as a
//! [`ValidationError`].
//!
//! Checks run in this order:
//!
//! 1. every required field is present and non-empty (all missing names are
//!    reported together)
//! 2. every schema field holds the kind of value its schema declares
//! 3. every enumerated field holds an exact, case-sensitive member of its set
//! 4. range pairs are ordered (`odometer_start <= odometer_end`)

use chrono::NaiveDate;
use records::{schema_for, FieldMap, FieldValue, NormalizedRecord, RecordType, ValueKind};
use serde::Serialize;
use tracing::debug;

mod error;

pub use crate::error::ValidationError;

/// Ordered numeric pairs: `(type, start, end)` with `start <= end` required
/// whenever both are present.
pub const NUMERIC_RANGES: &[(RecordType, &str, &str)] =
    &[(RecordType::Fuel, "odometer_start", "odometer_end")];

/// A record that passed every check. Only [`validate`] constructs one, so
/// holding a `ValidatedRecord` is proof the schema invariants hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRecord(NormalizedRecord);

impl ValidatedRecord {
    pub fn record_type(&self) -> RecordType {
        self.0.record_type
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date
    }

    pub fn fields(&self) -> &FieldMap {
        &self.0.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.text(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.0.number(name)
    }

    pub fn as_record(&self) -> &NormalizedRecord {
        &self.0
    }

    pub fn into_inner(self) -> NormalizedRecord {
        self.0
    }
}

fn kind_of(value: &FieldValue) -> ValueKind {
    match value {
        FieldValue::Text(_) => ValueKind::Text,
        FieldValue::Number(_) => ValueKind::Number,
        FieldValue::Date(_) => ValueKind::Date,
    }
}

pub fn validate(record: NormalizedRecord) -> Result<ValidatedRecord, ValidationError> {
    let schema = schema_for(record.record_type);

    let missing: Vec<&'static str> = schema
        .required()
        .filter(|f| !record.has(f.name))
        .map(|f| f.name)
        .collect();
    if !missing.is_empty() {
        debug!(record_type = %record.record_type, ?missing, "validate.missing_fields");
        return Err(ValidationError::MissingFields {
            record_type: record.record_type,
            fields: missing,
        });
    }

    for spec in schema.fields {
        if let Some(value) = record.get(spec.name) {
            if kind_of(value) != spec.kind {
                return Err(ValidationError::InvalidValueKind {
                    field: spec.name,
                    expected: spec.kind,
                });
            }
        }
    }

    for spec in schema.enumerated() {
        let (Some(value), Some(allowed)) = (record.text(spec.name), spec.allowed) else {
            continue;
        };
        if !spec.accepts(value) {
            return Err(ValidationError::InvalidEnumValue {
                field: spec.name,
                value: value.to_string(),
                allowed,
            });
        }
    }

    for &(record_type, start_field, end_field) in NUMERIC_RANGES {
        if record_type != record.record_type {
            continue;
        }
        if let (Some(start), Some(end)) = (record.number(start_field), record.number(end_field)) {
            if start > end {
                return Err(ValidationError::NumericInvariantViolation {
                    start_field,
                    end_field,
                    start,
                    end,
                });
            }
        }
    }

    Ok(ValidatedRecord(record))
}
