//! Best-effort inference of missing fields from the message text.

use chrono::{Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use records::next_weekday;
use regex::Regex;

use crate::config::CorrectorPolicy;
use crate::text::MessageText;

static LITERS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:liters?|litres?|l)\b").ok());

static ASSIGNEE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)\bassign(?:ed)?\s+(?:to\s+)?([a-z][a-z'\-]*)").ok());

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

pub(crate) fn category(text: &MessageText, policy: &CorrectorPolicy) -> String {
    text.first_rule(&policy.category_rules)
        .unwrap_or("Other")
        .to_string()
}

pub(crate) fn vehicle(text: &MessageText, policy: &CorrectorPolicy) -> String {
    text.first_rule(&policy.vehicle_rules)
        .unwrap_or("Other")
        .to_string()
}

pub(crate) fn liters(raw_text: &str) -> Option<f64> {
    let re = LITERS.as_ref()?;
    re.captures(raw_text)?.get(1)?.as_str().parse().ok()
}

/// The word after "assign", title-cased.
pub(crate) fn assignee(raw_text: &str) -> Option<String> {
    let re = ASSIGNEE.as_ref()?;
    let name = re.captures(raw_text)?.get(1)?.as_str();
    let mut chars = name.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
}

/// Relative deadline phrases: "today", "tomorrow", "next week" (next Monday),
/// or a weekday name. The first phrase found in that order wins.
pub(crate) fn deadline(text: &MessageText, today: NaiveDate) -> Option<NaiveDate> {
    if text.mentions("today") {
        return Some(today);
    }
    if text.mentions("tomorrow") {
        return Some(today + Duration::days(1));
    }
    if text.mentions("next week") {
        return Some(next_weekday(today, Weekday::Mon));
    }
    WEEKDAYS
        .iter()
        .find(|(name, _)| text.mentions(name))
        .map(|(_, day)| next_weekday(today, *day))
}

/// Urgency tier named by the text, if any.
pub(crate) fn severity(text: &MessageText, policy: &CorrectorPolicy) -> Option<&'static str> {
    if text.mentions_any(&policy.high_severity_terms) {
        Some("High")
    } else if text.mentions_any(&policy.medium_severity_terms) {
        Some("Medium")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    #[test]
    fn category_and_vehicle_rules() {
        let policy = CorrectorPolicy::default();
        assert_eq!(
            category(&MessageText::new("air compressor not working"), &policy),
            "Equipment"
        );
        assert_eq!(
            category(&MessageText::new("Fuel supply running low"), &policy),
            "Supply"
        );
        assert_eq!(category(&MessageText::new("Roof leaking"), &policy), "Other");

        assert_eq!(vehicle(&MessageText::new("the PRADO"), &policy), "Toyota Prado");
        assert_eq!(vehicle(&MessageText::new("the truck"), &policy), "Other");
    }

    #[test]
    fn liters_from_text() {
        assert_eq!(liters("Hilux took 40 liters"), Some(40.0));
        assert_eq!(liters("topped up 35.5L this morning"), Some(35.5));
        assert_eq!(liters("20 litres"), Some(20.0));
        assert_eq!(liters("drove 40 km"), None);
        assert_eq!(liters("40 lbs of cement"), None);
    }

    #[test]
    fn assignee_from_text() {
        assert_eq!(assignee("Assign JOHN to inspect the fence"), Some("John".into()));
        assert_eq!(assignee("please assign to mary the report"), Some("Mary".into()));
        assert_eq!(assignee("Prepare monthly report"), None);
    }

    #[test]
    fn deadline_phrases() {
        let mon = monday();
        let at = |s: &str| deadline(&MessageText::new(s), mon);
        assert_eq!(at("finish it today"), Some(mon));
        assert_eq!(at("by tomorrow please"), Some(mon + Duration::days(1)));
        assert_eq!(at("sometime next week"), Some(mon + Duration::days(7)));
        assert_eq!(at("due Friday"), Some(mon + Duration::days(4)));
        assert_eq!(at("no date given"), None);
    }

    #[test]
    fn severity_tiers() {
        let policy = CorrectorPolicy::default();
        let tier = |s: &str| severity(&MessageText::new(s), &policy);
        assert_eq!(tier("URGENT: pump down"), Some("High"));
        assert_eq!(tier("critical failure"), Some("High"));
        assert_eq!(tier("important but can wait"), Some("Medium"));
        assert_eq!(tier("urgent and important"), Some("High"));
        assert_eq!(tier("door squeaks"), None);
    }
}
