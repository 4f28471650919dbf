//! Static field schema registry.
//!
//! One [`RecordSchema`] per [`RecordType`], each a fixed slice of
//! [`FieldSpec`]s. The registry answers four questions for every later stage:
//! which fields are required, what kind of value each field holds, which
//! values an enumerated field accepts, and what to fill in when an optional
//! field is missing.
//!
//! | Type    | Required                                       | Enumerated                       |
//! |---------|------------------------------------------------|----------------------------------|
//! | Expense | amount, description                            |                                  |
//! | Fuel    | vehicle, liters, odometer_start, odometer_end  | vehicle                          |
//! | Task    | task_title, details                            | status                           |
//! | Issue   | category, description                          | category, severity, status       |
//!
//! `date` is not part of any field list: every record carries it and the
//! corrector fills it before validation.

use crate::types::RecordType;

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    Date,
}

/// Default applied by the corrector when an optional field is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Fixed literal value.
    Literal(&'static str),
    /// The configured default operator name.
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    pub required: bool,
    pub allowed: Option<&'static [&'static str]>,
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            allowed: None,
            default: None,
        }
    }

    const fn optional(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            allowed: None,
            default: None,
        }
    }

    const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    const fn or_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Exact, case-sensitive membership. Non-enumerated fields accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        match self.allowed {
            Some(allowed) => allowed.contains(&value),
            None => true,
        }
    }
}

#[derive(Debug)]
pub struct RecordSchema {
    pub record_type: RecordType,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn optional(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| !f.required)
    }

    pub fn enumerated(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.allowed.is_some())
    }

    pub fn defines(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

pub const VEHICLES: &[&str] = &["Toyota Hilux", "Toyota Prado", "Other"];
pub const TASK_STATUSES: &[&str] = &["To Do", "In Progress", "Done"];
pub const ISSUE_CATEGORIES: &[&str] = &["Equipment", "Supply", "Complaint", "Other"];
pub const ISSUE_SEVERITIES: &[&str] = &["Low", "Medium", "High"];
pub const ISSUE_STATUSES: &[&str] = &["Open", "Resolved"];

/// Who paid, when an expense message doesn't say.
pub const EXPENSE_PERSON: &str = "Me";

static EXPENSE_FIELDS: [FieldSpec; 4] = [
    FieldSpec::required("amount", ValueKind::Number),
    FieldSpec::required("description", ValueKind::Text),
    FieldSpec::optional("receipt_reference", ValueKind::Text),
    FieldSpec::optional("person", ValueKind::Text).or_default(FieldDefault::Literal(EXPENSE_PERSON)),
];

static FUEL_FIELDS: [FieldSpec; 7] = [
    FieldSpec::required("vehicle", ValueKind::Text).one_of(VEHICLES),
    FieldSpec::required("liters", ValueKind::Number),
    FieldSpec::required("odometer_start", ValueKind::Number),
    FieldSpec::required("odometer_end", ValueKind::Number),
    FieldSpec::optional("purpose", ValueKind::Text),
    FieldSpec::optional("driver", ValueKind::Text),
    FieldSpec::optional("logged_by", ValueKind::Text),
];

static TASK_FIELDS: [FieldSpec; 6] = [
    FieldSpec::required("task_title", ValueKind::Text),
    FieldSpec::required("details", ValueKind::Text),
    FieldSpec::optional("status", ValueKind::Text)
        .one_of(TASK_STATUSES)
        .or_default(FieldDefault::Literal("To Do")),
    FieldSpec::optional("deadline", ValueKind::Date),
    FieldSpec::optional("assigned_to", ValueKind::Text).or_default(FieldDefault::Operator),
    FieldSpec::optional("notes", ValueKind::Text),
];

static ISSUE_FIELDS: [FieldSpec; 6] = [
    FieldSpec::required("category", ValueKind::Text).one_of(ISSUE_CATEGORIES),
    FieldSpec::required("description", ValueKind::Text),
    FieldSpec::optional("severity", ValueKind::Text)
        .one_of(ISSUE_SEVERITIES)
        .or_default(FieldDefault::Literal("Low")),
    FieldSpec::optional("status", ValueKind::Text)
        .one_of(ISSUE_STATUSES)
        .or_default(FieldDefault::Literal("Open")),
    FieldSpec::optional("reported_by", ValueKind::Text).or_default(FieldDefault::Operator),
    FieldSpec::optional("resolution_notes", ValueKind::Text),
];

static EXPENSE: RecordSchema = RecordSchema {
    record_type: RecordType::Expense,
    fields: &EXPENSE_FIELDS,
};

static FUEL: RecordSchema = RecordSchema {
    record_type: RecordType::Fuel,
    fields: &FUEL_FIELDS,
};

static TASK: RecordSchema = RecordSchema {
    record_type: RecordType::Task,
    fields: &TASK_FIELDS,
};

static ISSUE: RecordSchema = RecordSchema {
    record_type: RecordType::Issue,
    fields: &ISSUE_FIELDS,
};

pub fn schema_for(record_type: RecordType) -> &'static RecordSchema {
    match record_type {
        RecordType::Expense => &EXPENSE,
        RecordType::Fuel => &FUEL,
        RecordType::Task => &TASK,
        RecordType::Issue => &ISSUE,
    }
}

/// Value kind for a field name regardless of record type.
///
/// Field names never change kind between schemas, which lets the extraction
/// adapter coerce values before the record type is final. Unknown names are
/// treated as text.
pub fn value_kind(name: &str) -> ValueKind {
    if name == "date" {
        return ValueKind::Date;
    }
    RecordType::ALL
        .iter()
        .find_map(|t| schema_for(*t).field(name))
        .map(|f| f.kind)
        .unwrap_or(ValueKind::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_per_type() {
        let names = |t| schema_for(t).required().map(|f| f.name).collect::<Vec<_>>();
        assert_eq!(names(RecordType::Expense), ["amount", "description"]);
        assert_eq!(
            names(RecordType::Fuel),
            ["vehicle", "liters", "odometer_start", "odometer_end"]
        );
        assert_eq!(names(RecordType::Task), ["task_title", "details"]);
        assert_eq!(names(RecordType::Issue), ["category", "description"]);
    }

    #[test]
    fn schema_for_returns_matching_type() {
        for t in RecordType::ALL {
            assert_eq!(schema_for(t).record_type, t);
        }
    }

    #[test]
    fn enumerated_fields_are_exact_match() {
        let issue = schema_for(RecordType::Issue);
        let severity = issue.field("severity").unwrap();
        assert!(severity.accepts("High"));
        assert!(!severity.accepts("high"));
        assert!(!severity.accepts("Extreme"));

        let description = issue.field("description").unwrap();
        assert!(description.accepts("anything at all"));
    }

    #[test]
    fn field_names_keep_one_kind_across_schemas() {
        for a in RecordType::ALL {
            for field in schema_for(a).fields {
                for b in RecordType::ALL {
                    if let Some(other) = schema_for(b).field(field.name) {
                        assert_eq!(field.kind, other.kind, "{} differs", field.name);
                    }
                }
            }
        }
    }

    #[test]
    fn value_kind_lookup() {
        assert_eq!(value_kind("amount"), ValueKind::Number);
        assert_eq!(value_kind("odometer_end"), ValueKind::Number);
        assert_eq!(value_kind("deadline"), ValueKind::Date);
        assert_eq!(value_kind("date"), ValueKind::Date);
        assert_eq!(value_kind("task_title"), ValueKind::Text);
        assert_eq!(value_kind("something_else"), ValueKind::Text);
    }

    #[test]
    fn defaults_cover_status_and_people() {
        let task = schema_for(RecordType::Task);
        assert_eq!(
            task.field("status").unwrap().default,
            Some(FieldDefault::Literal("To Do"))
        );
        assert_eq!(
            task.field("assigned_to").unwrap().default,
            Some(FieldDefault::Operator)
        );
        let issue = schema_for(RecordType::Issue);
        assert_eq!(
            issue.field("severity").unwrap().default,
            Some(FieldDefault::Literal("Low"))
        );
        assert_eq!(
            issue.field("reported_by").unwrap().default,
            Some(FieldDefault::Operator)
        );
    }
}
