//! Corrector policy: every hand-tuned word list and default name in one place.
//!
//! The defaults reproduce the vocabulary the corrector was tuned on. None of
//! it is load-bearing beyond that; deployments are expected to adjust the
//! lists to their own operators' phrasing.

use records::{ISSUE_CATEGORIES, VEHICLES};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("default_operator must not be empty")]
    EmptyOperator,
    #[error("{list} contains an empty term")]
    EmptyTerm { list: &'static str },
    #[error("{list} maps to `{value}`, which is not an allowed value")]
    UnknownValue { list: &'static str, value: String },
}

/// Keywords that select one enumerated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub value: String,
    pub terms: Vec<String>,
}

impl KeywordRule {
    fn new(value: &str, terms: &[&str]) -> Self {
        Self {
            value: value.to_string(),
            terms: words(terms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorPolicy {
    /// Fills `assigned_to` and `reported_by` when the message names nobody.
    pub default_operator: String,
    pub issue_terms: Vec<String>,
    pub fuel_terms: Vec<String>,
    /// Words that only show up when fuel was actually dispensed.
    pub fuel_activity_terms: Vec<String>,
    pub expense_terms: Vec<String>,
    pub task_terms: Vec<String>,
    pub high_severity_terms: Vec<String>,
    pub medium_severity_terms: Vec<String>,
    /// Evaluated in order; first hit wins, `Other` otherwise.
    pub category_rules: Vec<KeywordRule>,
    /// Evaluated in order; first hit wins, `Other` otherwise.
    pub vehicle_rules: Vec<KeywordRule>,
}

fn words(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Default for CorrectorPolicy {
    fn default() -> Self {
        Self {
            default_operator: "Operator".into(),
            issue_terms: words(&[
                "problem",
                "issue",
                "broken",
                "malfunction",
                "urgent",
                "critical",
                "emergency",
                "complaint",
                "fault",
                "running low",
                "shortage",
                "not working",
                "leak",
            ]),
            fuel_terms: words(&[
                "liter", "litre", "fuel", "diesel", "petrol", "gas", "hilux", "prado", "vehicle",
                "car",
            ]),
            fuel_activity_terms: words(&["liter", "litre", "used", "gave", "refueled", "refuelled"]),
            expense_terms: words(&["spent", "paid", "cost", "mwk", "money", "cash", "expense"]),
            task_terms: words(&[
                "assign", "task", "todo", "deadline", "prepare", "inspect", "check", "review",
                "complete", "finish",
            ]),
            high_severity_terms: words(&["urgent", "critical", "emergency"]),
            medium_severity_terms: words(&["important", "priority"]),
            category_rules: vec![
                KeywordRule::new("Equipment", &["equipment", "machine", "compressor", "generator", "pump"]),
                KeywordRule::new("Supply", &["fuel", "supply", "supplies", "material", "stock"]),
                KeywordRule::new("Complaint", &["complaint", "customer", "service"]),
            ],
            vehicle_rules: vec![
                KeywordRule::new("Toyota Hilux", &["hilux"]),
                KeywordRule::new("Toyota Prado", &["prado"]),
            ],
        }
    }
}

impl CorrectorPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.default_operator.trim().is_empty() {
            return Err(PolicyError::EmptyOperator);
        }
        let lists: [(&'static str, &Vec<String>); 7] = [
            ("issue_terms", &self.issue_terms),
            ("fuel_terms", &self.fuel_terms),
            ("fuel_activity_terms", &self.fuel_activity_terms),
            ("expense_terms", &self.expense_terms),
            ("task_terms", &self.task_terms),
            ("high_severity_terms", &self.high_severity_terms),
            ("medium_severity_terms", &self.medium_severity_terms),
        ];
        for (list, terms) in lists {
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(PolicyError::EmptyTerm { list });
            }
        }
        check_rules("category_rules", &self.category_rules, ISSUE_CATEGORIES)?;
        check_rules("vehicle_rules", &self.vehicle_rules, VEHICLES)?;
        Ok(())
    }
}

fn check_rules(
    list: &'static str,
    rules: &[KeywordRule],
    allowed: &[&str],
) -> Result<(), PolicyError> {
    for rule in rules {
        if !allowed.contains(&rule.value.as_str()) {
            return Err(PolicyError::UnknownValue {
                list,
                value: rule.value.clone(),
            });
        }
        if rule.terms.iter().any(|t| t.trim().is_empty()) {
            return Err(PolicyError::EmptyTerm { list });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = CorrectorPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.default_operator, "Operator");
        assert!(policy.issue_terms.iter().any(|t| t == "running low"));
    }

    #[test]
    fn rejects_rule_value_outside_enum() {
        let mut policy = CorrectorPolicy::default();
        policy.vehicle_rules.push(KeywordRule::new("Land Cruiser", &["cruiser"]));
        assert_eq!(
            policy.validate(),
            Err(PolicyError::UnknownValue {
                list: "vehicle_rules",
                value: "Land Cruiser".into()
            })
        );
    }

    #[test]
    fn rejects_blank_terms_and_operator() {
        let mut policy = CorrectorPolicy::default();
        policy.task_terms.push("  ".into());
        assert_eq!(
            policy.validate(),
            Err(PolicyError::EmptyTerm { list: "task_terms" })
        );

        let policy = CorrectorPolicy {
            default_operator: " ".into(),
            ..Default::default()
        };
        assert_eq!(policy.validate(), Err(PolicyError::EmptyOperator));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let policy: CorrectorPolicy =
            serde_json::from_str(r#"{"default_operator":"Nthambi"}"#).unwrap();
        assert_eq!(policy.default_operator, "Nthambi");
        assert_eq!(policy.high_severity_terms, CorrectorPolicy::default().high_severity_terms);
    }
}
