//! Internal field names → store column names.
//!
//! One static table per record type. A field without an entry in its type's
//! table is dropped; the store's schema decides what is storable.

use std::collections::BTreeMap;

use records::{FieldValue, RecordType, DATE_FORMAT};
use serde::Serialize;
use serde_json::{json, Value};
use validate::ValidatedRecord;

/// How a field value is written into its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEncoding {
    Plain,
    /// Attachment column: only `http(s)` references are forwarded, as
    /// `[{"url": ...}]`.
    Attachment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub column: &'static str,
    pub encoding: ColumnEncoding,
}

const fn col(field: &'static str, column: &'static str) -> ColumnSpec {
    ColumnSpec {
        field,
        column,
        encoding: ColumnEncoding::Plain,
    }
}

static EXPENSE_COLUMNS: [ColumnSpec; 5] = [
    col("date", "Date"),
    col("amount", "Amount"),
    col("description", "Description"),
    col("person", "Person"),
    ColumnSpec {
        field: "receipt_reference",
        column: "Receipt Photo",
        encoding: ColumnEncoding::Attachment,
    },
];

static FUEL_COLUMNS: [ColumnSpec; 8] = [
    col("date", "Date"),
    col("vehicle", "Vehicle"),
    col("driver", "Driver"),
    col("liters", "Liters"),
    col("odometer_start", "Odometer Start"),
    col("odometer_end", "Odometer End"),
    col("purpose", "Purpose"),
    col("logged_by", "Logged By"),
];

static TASK_COLUMNS: [ColumnSpec; 7] = [
    col("date", "Created At"),
    col("task_title", "Task"),
    col("details", "Details"),
    col("status", "Status"),
    col("deadline", "Deadline"),
    col("assigned_to", "Assigned To"),
    col("notes", "Notes"),
];

static ISSUE_COLUMNS: [ColumnSpec; 7] = [
    col("date", "Date"),
    col("reported_by", "Reported By"),
    col("category", "Category"),
    col("description", "Description"),
    col("severity", "Severity"),
    col("status", "Status"),
    col("resolution_notes", "Resolution Notes"),
];

pub fn table_columns(record_type: RecordType) -> &'static [ColumnSpec] {
    match record_type {
        RecordType::Expense => &EXPENSE_COLUMNS,
        RecordType::Fuel => &FUEL_COLUMNS,
        RecordType::Task => &TASK_COLUMNS,
        RecordType::Issue => &ISSUE_COLUMNS,
    }
}

/// Column → value for one store row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPayload {
    pub record_type: RecordType,
    pub columns: BTreeMap<String, Value>,
}

impl RowPayload {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// The body the store expects: `{"fields": {...}}`.
    pub fn to_fields_body(&self) -> Value {
        json!({ "fields": self.columns })
    }
}

/// JSON form of a plain value. Whole numbers become integers.
pub fn column_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => json!(*n as i64),
        FieldValue::Number(n) => json!(n),
        FieldValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
        FieldValue::Text(s) => Value::String(s.clone()),
    }
}

fn attachment_value(value: &FieldValue) -> Option<Value> {
    let reference = value.as_text()?.trim();
    let is_url = reference.starts_with("https://") || reference.starts_with("http://");
    is_url.then(|| json!([{ "url": reference }]))
}

/// Maps a validated record onto its table's columns.
pub fn map_to_store_columns(record: &ValidatedRecord) -> RowPayload {
    let record_type = record.record_type();
    let date = FieldValue::Date(record.date());
    let mut columns = BTreeMap::new();

    for spec in table_columns(record_type) {
        let value = if spec.field == "date" {
            Some(&date)
        } else {
            record.get(spec.field).filter(|v| !v.is_empty())
        };
        let Some(value) = value else { continue };
        let encoded = match spec.encoding {
            ColumnEncoding::Plain => Some(column_value(value)),
            ColumnEncoding::Attachment => attachment_value(value),
        };
        if let Some(encoded) = encoded {
            columns.insert(spec.column.to_string(), encoded);
        }
    }

    RowPayload {
        record_type,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use records::{FieldMap, NormalizedRecord};

    fn validated(record_type: RecordType, fields: &[(&str, FieldValue)]) -> ValidatedRecord {
        let fields: FieldMap = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        validate::validate(NormalizedRecord {
            record_type,
            date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            fields,
        })
        .unwrap()
    }

    fn expense(receipt: &str) -> ValidatedRecord {
        validated(
            RecordType::Expense,
            &[
                ("amount", FieldValue::Number(15000.0)),
                ("description", FieldValue::text("Filter replacement")),
                ("person", FieldValue::text("Me")),
                ("receipt_reference", FieldValue::text(receipt)),
                ("assigned_to", FieldValue::text("John")),
            ],
        )
    }

    #[test]
    fn expense_columns_and_drops_unmapped_fields() {
        let row = map_to_store_columns(&expense("https://example.com/r.jpg"));

        assert_eq!(row.get("Date"), Some(&json!("2025-08-04")));
        assert_eq!(row.get("Amount"), Some(&json!(15000)));
        assert_eq!(row.get("Description"), Some(&json!("Filter replacement")));
        assert_eq!(row.get("Person"), Some(&json!("Me")));
        assert_eq!(
            row.get("Receipt Photo"),
            Some(&json!([{ "url": "https://example.com/r.jpg" }]))
        );
        assert!(row.get("assigned_to").is_none());
        assert!(row.get("Assigned To").is_none());
        assert_eq!(row.columns.len(), 5);
    }

    #[test]
    fn non_url_receipt_is_omitted() {
        let row = map_to_store_columns(&expense("photo on my phone"));
        assert!(row.get("Receipt Photo").is_none());
    }

    #[test]
    fn task_date_goes_to_created_at() {
        let record = validated(
            RecordType::Task,
            &[
                ("task_title", FieldValue::text("Inspect fence")),
                ("details", FieldValue::text("Inspect the perimeter fence")),
                ("status", FieldValue::text("To Do")),
                (
                    "deadline",
                    FieldValue::Date(NaiveDate::from_ymd_opt(2025, 8, 8).unwrap()),
                ),
            ],
        );
        let row = map_to_store_columns(&record);
        assert_eq!(row.get("Created At"), Some(&json!("2025-08-04")));
        assert_eq!(row.get("Deadline"), Some(&json!("2025-08-08")));
        assert_eq!(row.get("Task"), Some(&json!("Inspect fence")));
        assert!(row.get("Date").is_none());
    }

    #[test]
    fn fractional_numbers_stay_floats() {
        let record = validated(
            RecordType::Fuel,
            &[
                ("vehicle", FieldValue::text("Toyota Hilux")),
                ("liters", FieldValue::Number(35.5)),
                ("odometer_start", FieldValue::Number(12300.0)),
                ("odometer_end", FieldValue::Number(12420.0)),
            ],
        );
        let row = map_to_store_columns(&record);
        assert_eq!(row.get("Liters"), Some(&json!(35.5)));
        assert_eq!(row.get("Odometer Start"), Some(&json!(12300)));
        assert!(row.get("Driver").is_none());
    }

    #[test]
    fn every_emitted_column_is_in_the_table() {
        let record = expense("https://example.com/r.jpg");
        let row = map_to_store_columns(&record);
        let allowed: Vec<_> = table_columns(RecordType::Expense)
            .iter()
            .map(|c| c.column)
            .collect();
        for column in row.columns.keys() {
            assert!(allowed.contains(&column.as_str()), "{column}");
        }
    }

    #[test]
    fn fields_body_wraps_columns() {
        let row = map_to_store_columns(&expense("https://example.com/r.jpg"));
        let body = row.to_fields_body();
        assert_eq!(body["fields"]["Amount"], json!(15000));
    }
}
