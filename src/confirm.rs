//! Confirmation text for stored records.
//!
//! Pure template selection on record type. The validator guarantees every
//! field read here as required is present; optional ones fall back to a
//! fixed placeholder.

use records::RecordType;
use serde::{Deserialize, Serialize};
use validate::ValidatedRecord;

use crate::config::ConfigLoadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmConfig {
    /// Currency code shown after expense amounts.
    pub currency: String,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            currency: "MWK".to_string(),
        }
    }
}

impl ConfirmConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.currency.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "confirm.currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// `15000` → `"15,000"`, `1234.5` → `"1,234.5"`.
pub fn format_amount(value: f64) -> String {
    let rendered = if value.fract() == 0.0 {
        format!("{}", value.abs() as i64)
    } else {
        format!("{}", value.abs())
    };
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

fn field(record: &ValidatedRecord, name: &str, fallback: &str) -> String {
    record
        .get(name)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

fn amount(record: &ValidatedRecord) -> String {
    record
        .number("amount")
        .map(format_amount)
        .unwrap_or_else(|| "?".to_string())
}

/// Full one-line confirmation for a single stored record.
pub fn render(record: &ValidatedRecord, cfg: &ConfirmConfig) -> String {
    match record.record_type() {
        RecordType::Expense => format!(
            "Logged expense: {} {} for {}.",
            amount(record),
            cfg.currency,
            field(record, "description", "")
        ),
        RecordType::Fuel => format!(
            "Logged fuel: {}L for {} ({}).",
            field(record, "liters", "?"),
            field(record, "vehicle", "Other"),
            field(record, "driver", "unspecified")
        ),
        RecordType::Task => format!(
            "Logged task: {} (Status: {}).",
            field(record, "task_title", ""),
            field(record, "status", "To Do")
        ),
        RecordType::Issue => format!(
            "Logged issue: {} (Severity: {}).",
            field(record, "description", ""),
            field(record, "severity", "Low")
        ),
    }
}

/// Short form used in multi-entry replies.
pub fn summary(record: &ValidatedRecord, cfg: &ConfirmConfig) -> String {
    match record.record_type() {
        RecordType::Expense => format!(
            "{} {} for {}",
            amount(record),
            cfg.currency,
            field(record, "description", "")
        ),
        RecordType::Fuel => format!(
            "{}L for {}",
            field(record, "liters", "?"),
            field(record, "vehicle", "Other")
        ),
        RecordType::Task => field(record, "task_title", ""),
        RecordType::Issue => format!(
            "{} ({})",
            field(record, "description", ""),
            field(record, "severity", "Low")
        ),
    }
}

pub fn emoji(record_type: RecordType) -> &'static str {
    match record_type {
        RecordType::Expense => "💰",
        RecordType::Fuel => "⛽",
        RecordType::Task => "📋",
        RecordType::Issue => "⚠️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use records::{FieldValue, NormalizedRecord};

    fn validated(record_type: RecordType, fields: &[(&str, FieldValue)]) -> ValidatedRecord {
        validate::validate(NormalizedRecord {
            record_type,
            date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        })
        .unwrap()
    }

    #[test]
    fn amounts_get_thousands_separators() {
        assert_eq!(format_amount(15000.0), "15,000");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(-2500.0), "-2,500");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn expense_template() {
        let record = validated(
            RecordType::Expense,
            &[
                ("amount", FieldValue::Number(15000.0)),
                ("description", FieldValue::text("Filter replacement")),
            ],
        );
        let cfg = ConfirmConfig::default();
        assert_eq!(
            render(&record, &cfg),
            "Logged expense: 15,000 MWK for Filter replacement."
        );
        assert_eq!(summary(&record, &cfg), "15,000 MWK for Filter replacement");
    }

    #[test]
    fn fuel_template_with_and_without_driver() {
        let mut fields = vec![
            ("vehicle", FieldValue::text("Toyota Hilux")),
            ("liters", FieldValue::Number(40.0)),
            ("odometer_start", FieldValue::Number(12300.0)),
            ("odometer_end", FieldValue::Number(12420.0)),
        ];
        let cfg = ConfirmConfig::default();
        let record = validated(RecordType::Fuel, &fields);
        assert_eq!(
            render(&record, &cfg),
            "Logged fuel: 40L for Toyota Hilux (unspecified)."
        );

        fields.push(("driver", FieldValue::text("John")));
        let record = validated(RecordType::Fuel, &fields);
        assert_eq!(render(&record, &cfg), "Logged fuel: 40L for Toyota Hilux (John).");
    }

    #[test]
    fn task_and_issue_templates() {
        let cfg = ConfirmConfig::default();
        let task = validated(
            RecordType::Task,
            &[
                ("task_title", FieldValue::text("Safety inspection")),
                ("details", FieldValue::text("Inspect the site")),
                ("status", FieldValue::text("To Do")),
            ],
        );
        assert_eq!(
            render(&task, &cfg),
            "Logged task: Safety inspection (Status: To Do)."
        );

        let issue = validated(
            RecordType::Issue,
            &[
                ("category", FieldValue::text("Equipment")),
                ("description", FieldValue::text("Air compressor not working")),
                ("severity", FieldValue::text("Medium")),
            ],
        );
        assert_eq!(
            render(&issue, &cfg),
            "Logged issue: Air compressor not working (Severity: Medium)."
        );
        assert_eq!(emoji(RecordType::Issue), "⚠️");
    }

    #[test]
    fn currency_is_configurable() {
        let record = validated(
            RecordType::Expense,
            &[
                ("amount", FieldValue::Number(250.0)),
                ("description", FieldValue::text("Padlock")),
            ],
        );
        let cfg = ConfirmConfig {
            currency: "ZAR".into(),
        };
        assert_eq!(render(&record, &cfg), "Logged expense: 250 ZAR for Padlock.");
    }
}
