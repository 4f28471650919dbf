//! Opslog extraction adapter.
//!
//! Sends the operator's raw text plus a fixed instruction set to an external
//! classifier/extractor and turns whatever comes back into a
//! [`Candidate`](records::Candidate).
//!
//! The extractor itself is opaque. It sits behind [`ExtractionService`], a
//! single request/response method, so the rest of the pipeline can be driven
//! by deterministic fakes in tests. Two implementations ship here:
//!
//! - [`ChatCompletionsExtractor`] posts to an OpenAI-compatible
//!   `chat/completions` endpoint.
//! - [`StubExtractor`] answers from a small keyword heuristic or a table of
//!   canned payloads, for dry runs and tests.
//!
//! No retries happen at this layer. A failed call or an unusable payload is an
//! [`ExtractError`] and ends that message's processing.

use async_trait::async_trait;
use chrono::NaiveDate;
use records::Candidate;
use tracing::debug;

mod api;
mod config;
mod error;
mod parse;
mod prompt;
mod stub;

pub use crate::api::ChatCompletionsExtractor;
pub use crate::config::ExtractConfig;
pub use crate::error::ExtractError;
pub use crate::parse::{parse_candidate, parse_number_text};
pub use crate::prompt::{few_shot_examples, instructions, ExampleTurn};
pub use crate::stub::StubExtractor;

/// Everything the external extractor gets to see for one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub raw_text: String,
    pub current_date: NaiveDate,
    pub instructions: String,
    pub examples: Vec<ExampleTurn>,
}

impl ExtractionRequest {
    /// Builds the request with the standard instruction set.
    pub fn new(raw_text: &str, current_date: NaiveDate, default_operator: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            current_date,
            instructions: instructions(current_date, default_operator),
            examples: few_shot_examples(current_date, default_operator),
        }
    }
}

/// The external classifier/extractor.
///
/// Implementations return the raw structured payload (normally a JSON object
/// as text); parsing is done by [`extract`] so every implementation is held to
/// the same structural rules.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn complete(&self, request: &ExtractionRequest) -> Result<String, ExtractError>;
}

/// Calls the extractor once and parses its payload into a candidate.
pub async fn extract(
    service: &dyn ExtractionService,
    request: &ExtractionRequest,
) -> Result<Candidate, ExtractError> {
    let payload = service.complete(request).await?;
    debug!(payload_len = payload.len(), "extract.payload_received");
    parse_candidate(&payload)
}
