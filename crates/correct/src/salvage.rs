//! Recovery of a primary text field from whatever the extractor populated
//! under an earlier type guess.

use records::{schema_for, FieldMap, FieldValue, RecordType};

/// Where a salvaged value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalvageSource {
    Field(&'static str),
    RawText,
}

struct SalvageRule {
    record_type: RecordType,
    target: &'static str,
    sources: &'static [&'static str],
    raw_text_fallback: bool,
}

// Order matters for Task: `details` claims `description` first and
// `task_title` then copies from `details`.
static SALVAGE_RULES: [SalvageRule; 4] = [
    SalvageRule {
        record_type: RecordType::Issue,
        target: "description",
        sources: &["task_title", "details"],
        raw_text_fallback: true,
    },
    SalvageRule {
        record_type: RecordType::Task,
        target: "details",
        sources: &["description"],
        raw_text_fallback: true,
    },
    SalvageRule {
        record_type: RecordType::Task,
        target: "task_title",
        sources: &["description", "details"],
        raw_text_fallback: false,
    },
    SalvageRule {
        record_type: RecordType::Expense,
        target: "description",
        sources: &["details", "purpose"],
        raw_text_fallback: false,
    },
];

fn is_set(fields: &FieldMap, name: &str) -> bool {
    fields.get(name).is_some_and(|v| !v.is_empty())
}

/// Fills empty primary text fields for `record_type`.
///
/// A source field the target schema does not define is moved; one it does
/// define is copied. Returns `(target, source)` for every field filled.
pub(crate) fn salvage(
    record_type: RecordType,
    fields: &mut FieldMap,
    raw_text: &str,
) -> Vec<(&'static str, SalvageSource)> {
    let schema = schema_for(record_type);
    let mut filled = Vec::new();

    for rule in SALVAGE_RULES.iter().filter(|r| r.record_type == record_type) {
        if is_set(fields, rule.target) {
            continue;
        }
        let found = rule.sources.iter().copied().find(|s| is_set(fields, s));
        let value = match found {
            Some(source) if schema.defines(source) => {
                fields.get(source).cloned().map(|v| (v, SalvageSource::Field(source)))
            }
            Some(source) => fields.remove(source).map(|v| (v, SalvageSource::Field(source))),
            None if rule.raw_text_fallback && !raw_text.trim().is_empty() => Some((
                FieldValue::text(raw_text.trim()),
                SalvageSource::RawText,
            )),
            None => None,
        };
        if let Some((value, source)) = value {
            fields.insert(rule.target.to_string(), value);
            filled.push((rule.target, source));
        }
    }
    filled
}
