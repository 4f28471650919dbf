//! Turns an extractor payload into a [`Candidate`].
//!
//! The payload must be a JSON object carrying a `type` discriminator. Field
//! values are coerced to the kind the schema registry declares for their
//! name; values that cannot be coerced are dropped here and show up later as
//! missing fields if the final record type requires them.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use records::{value_kind, Candidate, FieldValue, RecordType, ValueKind, DATE_FORMAT};
use serde_json::{Map, Value};
use tracing::debug;

use crate::ExtractError;

static NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").ok());

const DATE_FORMATS: [&str; 5] = [DATE_FORMAT, "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y", "%Y/%m/%d"];

pub fn parse_candidate(payload: &str) -> Result<Candidate, ExtractError> {
    let body = strip_code_fence(payload);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ExtractError::MalformedResponse(format!("payload is not JSON: {e}")))?;
    let Value::Object(map) = value else {
        return Err(ExtractError::MalformedResponse(
            "payload is not a JSON object".into(),
        ));
    };
    candidate_from_object(map)
}

pub(crate) fn candidate_from_object(map: Map<String, Value>) -> Result<Candidate, ExtractError> {
    let mut record_type = None;
    let mut candidate_date = None;
    let mut fields = records::FieldMap::new();

    for (raw_name, raw_value) in map {
        let name = normalize_field_name(&raw_name);
        match name.as_str() {
            "type" => {
                let Some(discriminator) = raw_value.as_str() else {
                    return Err(ExtractError::MalformedResponse(
                        "`type` is not a string".into(),
                    ));
                };
                let parsed = discriminator
                    .parse::<RecordType>()
                    .map_err(|e| ExtractError::UnknownType(e.0))?;
                record_type = Some(parsed);
            }
            "date" => candidate_date = coerce_date(&raw_value),
            _ => match coerce(&name, &raw_value) {
                Some(value) => {
                    fields.insert(name, value);
                }
                None => debug!(field = %name, value = %raw_value, "extract.field_dropped"),
            },
        }
    }

    let record_type = record_type.ok_or(ExtractError::MissingType)?;
    Ok(Candidate {
        record_type,
        date: candidate_date,
        fields,
    })
}

/// Models like to wrap JSON in Markdown fences; peel one layer if present.
fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub(crate) fn normalize_field_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn coerce(name: &str, value: &Value) -> Option<FieldValue> {
    match value_kind(name) {
        ValueKind::Number => coerce_number(value).map(FieldValue::Number),
        ValueKind::Date => coerce_date(value).map(FieldValue::Date),
        ValueKind::Text => coerce_text(value).map(FieldValue::Text),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number_text(s),
        _ => None,
    }
}

/// Reads the first number out of text like `"15,000 MWK"` or `"40L"`.
pub fn parse_number_text(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '_').collect();
    let re = NUMBER.as_ref()?;
    re.find(&cleaned)?.as_str().parse().ok()
}

fn coerce_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
