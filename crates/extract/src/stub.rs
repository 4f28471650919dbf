use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::parse::parse_number_text;
use crate::{ExtractError, ExtractionRequest, ExtractionService};

/// Deterministic extractor used for dry runs and tests.
///
/// Messages registered with [`with_response`](Self::with_response) get their
/// canned payload back verbatim. Anything else is classified by a crude
/// keyword heuristic that only ever fills the primary fields.
#[derive(Debug, Clone, Default)]
pub struct StubExtractor {
    canned: HashMap<String, String>,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, text: &str, payload: impl Into<String>) -> Self {
        self.canned.insert(text.trim().to_string(), payload.into());
        self
    }

    fn heuristic(text: &str) -> Value {
        let lower = text.to_lowercase();
        let number = parse_number_text(text);
        let mentions = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

        if mentions(&["liter", "litre"]) {
            json!({ "type": "fuel", "liters": number, "purpose": text })
        } else if mentions(&["spent", "paid", "bought", "mwk"]) {
            json!({ "type": "expense", "amount": number, "description": text })
        } else if mentions(&["assign", "prepare", "task", "need to"]) {
            json!({ "type": "task", "task_title": text, "details": text })
        } else {
            json!({ "type": "issue", "description": text })
        }
    }
}

#[async_trait]
impl ExtractionService for StubExtractor {
    async fn complete(&self, request: &ExtractionRequest) -> Result<String, ExtractError> {
        let text = request.raw_text.trim();
        if let Some(payload) = self.canned.get(text) {
            return Ok(payload.clone());
        }
        Ok(Self::heuristic(text).to_string())
    }
}
