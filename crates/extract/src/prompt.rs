//! Fixed instruction set sent with every extraction request.
//!
//! The instruction text is generated from the schema registry so the enum
//! values the extractor is told about are exactly the ones the validator
//! accepts.

use chrono::{NaiveDate, Weekday};
use records::{
    next_weekday, DATE_FORMAT, EXPENSE_PERSON, ISSUE_CATEGORIES, ISSUE_SEVERITIES, ISSUE_STATUSES,
    TASK_STATUSES, VEHICLES,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One few-shot pair: an operator message and the payload we want back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleTurn {
    pub user: String,
    pub assistant: String,
}

fn quoted(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn instructions(current_date: NaiveDate, default_operator: &str) -> String {
    let today = current_date.format(DATE_FORMAT);
    let friday = next_weekday(current_date, Weekday::Fri).format(DATE_FORMAT);
    format!(
        "You are a structured logger for a service station operations system.\n\
\n\
Given a user message, classify it into one of: expense, fuel, task, issue. \
Extract relevant fields depending on type.\n\
\n\
Output a single JSON object with a \"type\" field and the appropriate keys:\n\
\n\
- expense: date, amount, description, person (default \"{EXPENSE_PERSON}\"), receipt_reference (if provided)\n\
- fuel: date, vehicle, driver, liters, odometer_start, odometer_end, purpose\n\
- task: task_title, details, status (default \"To Do\"), deadline (if mentioned), assigned_to (default \"{default_operator}\")\n\
- issue: category, description, severity (default \"Low\"), status (default \"Open\"), reported_by (default \"{default_operator}\")\n\
\n\
For vehicle, use one of: {vehicles}\n\
For task status, use one of: {task_statuses}\n\
For issue category, use one of: {categories}\n\
For issue severity, use one of: {severities}\n\
For issue status, use one of: {issue_statuses} (never a task status)\n\
For amounts and readings, output numbers only (\"15,000 MWK\" becomes 15000).\n\
For dates, use YYYY-MM-DD. Today is {today}; use it when no date is given.\n\
Convert relative dates to actual dates (\"Friday\" becomes \"{friday}\").\n\
Severity keywords: \"urgent\", \"critical\", \"emergency\" mean \"High\"; \
\"important\", \"priority\" mean \"Medium\"; otherwise \"Low\".\n\
\n\
Only include fields that are present or can be reasonably inferred.",
        vehicles = quoted(VEHICLES),
        task_statuses = quoted(TASK_STATUSES),
        categories = quoted(ISSUE_CATEGORIES),
        severities = quoted(ISSUE_SEVERITIES),
        issue_statuses = quoted(ISSUE_STATUSES),
    )
}

pub fn few_shot_examples(current_date: NaiveDate, default_operator: &str) -> Vec<ExampleTurn> {
    let today = current_date.format(DATE_FORMAT).to_string();
    let friday = next_weekday(current_date, Weekday::Fri)
        .format(DATE_FORMAT)
        .to_string();

    let pairs = [
        (
            "Paid 15,000 MWK for filter replacement from petty cash.",
            json!({
                "type": "expense",
                "date": today,
                "amount": 15000,
                "description": "Filter replacement",
                "person": EXPENSE_PERSON,
            }),
        ),
        (
            "Gave 40 liters diesel to Hilux, driver John, for Salima trip. Odometer start 12300 end 12420.",
            json!({
                "type": "fuel",
                "date": today,
                "vehicle": "Toyota Hilux",
                "driver": "John",
                "liters": 40,
                "odometer_start": 12300,
                "odometer_end": 12420,
                "purpose": "Salima trip",
            }),
        ),
        (
            "Assign John to safety inspection by Friday",
            json!({
                "type": "task",
                "task_title": "Safety inspection",
                "details": "Assign John to safety inspection",
                "status": "To Do",
                "deadline": friday,
                "assigned_to": "John",
            }),
        ),
        (
            "Urgent: Air compressor malfunctioning",
            json!({
                "type": "issue",
                "category": "Equipment",
                "description": "Air compressor malfunctioning",
                "severity": "High",
                "status": "Open",
                "reported_by": default_operator,
            }),
        ),
        (
            "Fuel supply running low",
            json!({
                "type": "issue",
                "category": "Supply",
                "description": "Fuel supply running low",
                "severity": "Medium",
                "status": "Open",
                "reported_by": default_operator,
            }),
        ),
    ];

    pairs
        .into_iter()
        .map(|(user, payload)| ExampleTurn {
            user: user.to_string(),
            assistant: payload.to_string(),
        })
        .collect()
}
