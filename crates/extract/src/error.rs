use thiserror::Error;

/// Errors surfaced by the extraction adapter.
///
/// Every variant is an extraction failure from the pipeline's point of view:
/// either the extractor could not be reached, or what it returned cannot be
/// turned into a candidate record. Nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// Configuration is inconsistent (e.g., api mode without an endpoint).
    #[error("invalid extract config: {0}")]
    InvalidConfig(String),
    /// The HTTP call never produced a response.
    #[error("extractor request failed: {0}")]
    Request(String),
    /// The extractor answered with a non-success status.
    #[error("extractor returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The payload is not a JSON object, or the envelope around it is broken.
    #[error("malformed extractor response: {0}")]
    MalformedResponse(String),
    /// The payload parsed but carries no `type` discriminator.
    #[error("extractor response has no `type` field")]
    MissingType,
    /// The `type` discriminator names no known record kind.
    #[error("extractor returned unknown record type `{0}`")]
    UnknownType(String),
}

impl ExtractError {
    /// True when the payload itself was unusable, as opposed to the call failing.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ExtractError::MalformedResponse(_)
                | ExtractError::MissingType
                | ExtractError::UnknownType(_)
        )
    }
}
