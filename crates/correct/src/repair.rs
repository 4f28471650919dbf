//! Field-name and status repairs.

use records::{FieldMap, FieldValue, RecordType};

/// Misnamed field → canonical field. All entries are text-kind on both sides,
/// so a rename never changes how the value was coerced.
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("receipt_url", "receipt_reference"),
    ("receipt", "receipt_reference"),
    ("receipt_photo", "receipt_reference"),
    ("title", "task_title"),
    ("task", "task_title"),
    ("assignee", "assigned_to"),
    ("reporter", "reported_by"),
    ("note", "notes"),
];

/// Renames aliased fields whose canonical field is absent or empty.
/// Returns `(alias, canonical)` for every rename performed.
pub(crate) fn rename_aliases(fields: &mut FieldMap) -> Vec<(&'static str, &'static str)> {
    let mut renamed = Vec::new();
    for (alias, canonical) in FIELD_ALIASES {
        let canonical_set = fields.get(*canonical).is_some_and(|v| !v.is_empty());
        if canonical_set {
            continue;
        }
        if let Some(value) = fields.remove(*alias) {
            fields.insert(canonical.to_string(), value);
            renamed.push((*alias, *canonical));
        }
    }
    renamed
}

/// Translates a status from the other type's vocabulary. Unknown statuses
/// are left untouched for the validator to reject.
pub(crate) fn repair_status(record_type: RecordType, status: &str) -> Option<&'static str> {
    match (record_type, status) {
        (RecordType::Issue, "Done") => Some("Resolved"),
        (RecordType::Issue, "To Do" | "In Progress") => Some("Open"),
        (RecordType::Task, "Open") => Some("To Do"),
        (RecordType::Task, "Resolved") => Some("Done"),
        _ => None,
    }
}

/// Applies [`repair_status`] in place; returns the `(old, new)` pair if it fired.
pub(crate) fn repair_status_field(
    record_type: RecordType,
    fields: &mut FieldMap,
) -> Option<(String, &'static str)> {
    let old = fields.get("status")?.as_text()?.to_string();
    let new = repair_status(record_type, &old)?;
    fields.insert("status".into(), FieldValue::text(new));
    Some((old, new))
}
