//! Ordered keyword override table.
//!
//! Each entry is a predicate over the message text and the candidate's
//! fields, paired with the type the candidate is moved to. Entries are tried
//! in table order against the extractor's declared type and the first match
//! wins; at most one override applies per message.

use records::{FieldMap, RecordType};

use crate::config::CorrectorPolicy;
use crate::text::MessageText;

/// What an override predicate gets to look at.
pub(crate) struct RuleInput<'a> {
    pub text: &'a MessageText,
    pub fields: &'a FieldMap,
    pub policy: &'a CorrectorPolicy,
}

#[derive(Debug)]
pub struct OverrideRule {
    pub name: &'static str,
    pub from: RecordType,
    pub to: RecordType,
    when: fn(&RuleInput<'_>) -> bool,
}

impl OverrideRule {
    pub(crate) fn matches(&self, current: RecordType, input: &RuleInput<'_>) -> bool {
        current == self.from && (self.when)(input)
    }
}

const FUEL_MEASUREMENTS: [&str; 3] = ["liters", "odometer_start", "odometer_end"];

fn fuel_supply_issue(input: &RuleInput<'_>) -> bool {
    let p = input.policy;
    input.text.mentions_any(&p.issue_terms)
        && !input.text.mentions_any(&p.fuel_activity_terms)
        && !FUEL_MEASUREMENTS
            .iter()
            .any(|f| input.fields.get(*f).is_some_and(|v| !v.is_empty()))
}

/// Urgency words pin a record to Issue; no Issue → X rule may fire on them.
fn urgent(input: &RuleInput<'_>) -> bool {
    input.text.mentions_any(&input.policy.high_severity_terms)
}

fn issue_is_fuel_log(input: &RuleInput<'_>) -> bool {
    let p = input.policy;
    input.text.mentions_any(&p.fuel_terms)
        && input.text.mentions_any(&p.fuel_activity_terms)
        && !input.text.mentions_any(&p.issue_terms)
}

fn issue_is_expense(input: &RuleInput<'_>) -> bool {
    input.text.mentions_any(&input.policy.expense_terms) && !urgent(input)
}

fn issue_is_task(input: &RuleInput<'_>) -> bool {
    input.text.mentions_any(&input.policy.task_terms) && !urgent(input)
}

fn task_is_issue(input: &RuleInput<'_>) -> bool {
    input.text.mentions_any(&input.policy.issue_terms)
}

static OVERRIDE_RULES: [OverrideRule; 5] = [
    OverrideRule {
        name: "fuel_supply_issue",
        from: RecordType::Fuel,
        to: RecordType::Issue,
        when: fuel_supply_issue,
    },
    OverrideRule {
        name: "issue_is_fuel_log",
        from: RecordType::Issue,
        to: RecordType::Fuel,
        when: issue_is_fuel_log,
    },
    OverrideRule {
        name: "issue_is_expense",
        from: RecordType::Issue,
        to: RecordType::Expense,
        when: issue_is_expense,
    },
    OverrideRule {
        name: "issue_is_task",
        from: RecordType::Issue,
        to: RecordType::Task,
        when: issue_is_task,
    },
    OverrideRule {
        name: "task_is_issue",
        from: RecordType::Task,
        to: RecordType::Issue,
        when: task_is_issue,
    },
];

/// The table in priority order.
pub fn override_rules() -> &'static [OverrideRule] {
    &OVERRIDE_RULES
}

pub(crate) fn first_override(
    current: RecordType,
    input: &RuleInput<'_>,
) -> Option<&'static OverrideRule> {
    OVERRIDE_RULES.iter().find(|r| r.matches(current, input))
}
