//! Opslog classification corrector.
//!
//! Takes the extractor's [`Candidate`] together with the original message and
//! produces a [`NormalizedRecord`] whose type is final. The extractor is good
//! but makes predictable mistakes on certain phrasing; this crate fixes those
//! with a small, explicit rule set rather than trying to understand language.
//!
//! Steps, in order:
//!
//! 1. rename misnamed fields ([`FIELD_ALIASES`])
//! 2. apply the first matching keyword override ([`override_rules`])
//! 3. translate a status that belongs to the other type's vocabulary
//! 4. salvage empty primary text fields from leftovers or the raw text
//! 5. infer missing category, vehicle, liters, assignee and deadline from text
//! 6. raise Issue severity from urgency vocabulary
//! 7. fill schema defaults and the record date
//!
//! Every step is a pure function of its inputs. All vocabulary lives in
//! [`CorrectorPolicy`]. Each change is returned as a [`CorrectionNote`] and
//! logged at `debug`.

use chrono::NaiveDate;
use records::{
    schema_for, Candidate, FieldDefault, FieldMap, FieldValue, NormalizedRecord, RecordType,
};
use tracing::debug;

mod config;
mod infer;
mod repair;
mod rules;
mod salvage;
mod text;

pub use crate::config::{CorrectorPolicy, KeywordRule, PolicyError};
pub use crate::repair::FIELD_ALIASES;
pub use crate::rules::{override_rules, OverrideRule};
pub use crate::salvage::SalvageSource;

use crate::rules::RuleInput;
use crate::text::MessageText;

/// One change the corrector made.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionNote {
    Renamed {
        from: &'static str,
        to: &'static str,
    },
    Reclassified {
        rule: &'static str,
        from: RecordType,
        to: RecordType,
    },
    StatusRepaired {
        from: String,
        to: &'static str,
    },
    Salvaged {
        field: &'static str,
        source: SalvageSource,
    },
    Inferred {
        field: &'static str,
    },
    SeverityRaised {
        severity: &'static str,
    },
    Defaulted {
        field: &'static str,
    },
    DateDefaulted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub record: NormalizedRecord,
    pub notes: Vec<CorrectionNote>,
}

impl Correction {
    /// Name of the override rule that changed the type, if one did.
    pub fn reclassified_by(&self) -> Option<&'static str> {
        self.notes.iter().find_map(|n| match n {
            CorrectionNote::Reclassified { rule, .. } => Some(*rule),
            _ => None,
        })
    }
}

fn is_set(fields: &FieldMap, name: &str) -> bool {
    fields.get(name).is_some_and(|v| !v.is_empty())
}

/// Runs every correction step over `candidate`.
///
/// `current_date` fills the record date and anchors relative deadlines.
pub fn correct(
    candidate: Candidate,
    raw_text: &str,
    current_date: NaiveDate,
    policy: &CorrectorPolicy,
) -> Correction {
    let Candidate {
        record_type: declared,
        date,
        mut fields,
    } = candidate;
    let text = MessageText::new(raw_text);
    let mut notes = Vec::new();

    for (from, to) in repair::rename_aliases(&mut fields) {
        debug!(from, to, "correct.field_renamed");
        notes.push(CorrectionNote::Renamed { from, to });
    }

    let input = RuleInput {
        text: &text,
        fields: &fields,
        policy,
    };
    let record_type = match rules::first_override(declared, &input) {
        Some(rule) => {
            debug!(rule = rule.name, from = %declared, to = %rule.to, "correct.reclassified");
            notes.push(CorrectionNote::Reclassified {
                rule: rule.name,
                from: declared,
                to: rule.to,
            });
            rule.to
        }
        None => declared,
    };

    if let Some((from, to)) = repair::repair_status_field(record_type, &mut fields) {
        debug!(from = %from, to, "correct.status_repaired");
        notes.push(CorrectionNote::StatusRepaired { from, to });
    }

    for (field, source) in salvage::salvage(record_type, &mut fields, raw_text) {
        debug!(field, source = ?source, "correct.field_salvaged");
        notes.push(CorrectionNote::Salvaged { field, source });
    }

    infer_missing(record_type, &mut fields, &text, raw_text, current_date, policy, &mut notes);

    if record_type == RecordType::Issue {
        if let Some(severity) = infer::severity(&text, policy) {
            fields.insert("severity".into(), FieldValue::text(severity));
            notes.push(CorrectionNote::SeverityRaised { severity });
        }
    }

    for spec in schema_for(record_type).optional() {
        let Some(default) = spec.default else { continue };
        if is_set(&fields, spec.name) {
            continue;
        }
        let value = match default {
            FieldDefault::Literal(v) => v.to_string(),
            FieldDefault::Operator => policy.default_operator.clone(),
        };
        fields.insert(spec.name.to_string(), FieldValue::Text(value));
        notes.push(CorrectionNote::Defaulted { field: spec.name });
    }

    let date = date.unwrap_or_else(|| {
        notes.push(CorrectionNote::DateDefaulted);
        current_date
    });

    Correction {
        record: NormalizedRecord {
            record_type,
            date,
            fields,
        },
        notes,
    }
}

fn infer_missing(
    record_type: RecordType,
    fields: &mut FieldMap,
    text: &MessageText,
    raw_text: &str,
    current_date: NaiveDate,
    policy: &CorrectorPolicy,
    notes: &mut Vec<CorrectionNote>,
) {
    let mut fill = |fields: &mut FieldMap, field: &'static str, value: Option<FieldValue>| {
        if is_set(fields, field) {
            return;
        }
        if let Some(value) = value {
            debug!(field, value = %value, "correct.field_inferred");
            fields.insert(field.to_string(), value);
            notes.push(CorrectionNote::Inferred { field });
        }
    };

    match record_type {
        RecordType::Issue => {
            let category = infer::category(text, policy);
            fill(fields, "category", Some(FieldValue::Text(category)));
        }
        RecordType::Fuel => {
            let vehicle = infer::vehicle(text, policy);
            fill(fields, "vehicle", Some(FieldValue::Text(vehicle)));
            fill(fields, "liters", infer::liters(raw_text).map(FieldValue::Number));
        }
        RecordType::Task => {
            fill(fields, "assigned_to", infer::assignee(raw_text).map(FieldValue::Text));
            fill(
                fields,
                "deadline",
                infer::deadline(text, current_date).map(FieldValue::Date),
            );
        }
        RecordType::Expense => {}
    }
}
