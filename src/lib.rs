//! Workspace umbrella crate for opslog.
//!
//! Turns a free-form operator message ("Spent 15,000 on filter replacement",
//! "Hilux 40 liters, odo 12300 to 12420") into a typed record, stores it, and
//! answers with a confirmation line. The stages live in their own crates and
//! are stitched together here:
//!
//! ```text
//! raw text ─▶ extract ─▶ correct ─▶ validate ─▶ map ─▶ RecordStore ─▶ confirmation
//! ```
//!
//! [`Pipeline`] owns the two external collaborators (the extractor and the
//! record store) behind trait objects and bounds each call with a timeout.
//! Everything between them is pure and synchronous; see [`prepare_row`].

pub use correct::{correct, Correction, CorrectionNote, CorrectorPolicy};
pub use extract::{
    extract, ChatCompletionsExtractor, ExtractConfig, ExtractError, ExtractionRequest,
    ExtractionService, StubExtractor,
};
pub use records::{Candidate, FieldValue, NormalizedRecord, RecordType};
pub use store::{
    map_to_store_columns, InMemoryStore, RecordStore, RowPayload, StoreConfig, StoreError,
    TableNames,
};
pub use validate::{validate, ValidatedRecord, ValidationError};

pub mod config;
pub mod confirm;
mod pipeline;

pub use crate::config::{ConfigLoadError, LoggingConfig, OpsConfig, PipelineSettings};
pub use crate::confirm::ConfirmConfig;
pub use crate::pipeline::{
    prepare_row, EntryOutcome, MessageReport, Pipeline, PreparedRow, StoredEntry,
};

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// The external party a call was waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Extractor,
    Store,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Extractor => f.write_str("extraction service"),
            Collaborator::Store => f.write_str("record store"),
        }
    }
}

/// Errors that end the processing of one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    EmptyMessage,
    Extract(ExtractError),
    Validation(ValidationError),
    Store(StoreError),
    Timeout {
        collaborator: Collaborator,
        after: Duration,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptyMessage => write!(f, "message is empty"),
            PipelineError::Extract(err) => write!(f, "extraction failure: {err}"),
            PipelineError::Validation(err) => write!(f, "validation failure: {err}"),
            PipelineError::Store(err) => write!(f, "store failure: {err}"),
            PipelineError::Timeout {
                collaborator,
                after,
            } => write!(f, "{collaborator} timed out after {}s", after.as_secs()),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Extract(err) => Some(err),
            PipelineError::Validation(err) => Some(err),
            PipelineError::Store(err) => Some(err),
            PipelineError::EmptyMessage | PipelineError::Timeout { .. } => None,
        }
    }
}

impl From<ExtractError> for PipelineError {
    fn from(value: ExtractError) -> Self {
        PipelineError::Extract(value)
    }
}

impl From<ValidationError> for PipelineError {
    fn from(value: ValidationError) -> Self {
        PipelineError::Validation(value)
    }
}

impl From<StoreError> for PipelineError {
    fn from(value: StoreError) -> Self {
        PipelineError::Store(value)
    }
}

impl PipelineError {
    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::EmptyMessage => "empty_message",
            PipelineError::Extract(_) => "extraction",
            PipelineError::Validation(_) => "validation",
            PipelineError::Store(_) => "store",
            PipelineError::Timeout { .. } => "timeout",
        }
    }

    /// Text shown to the operator. Validation failures name the field(s) to fix.
    pub fn operator_message(&self) -> String {
        match self {
            PipelineError::EmptyMessage => {
                "Message is empty. Describe an expense, fuel log, task or issue.".to_string()
            }
            PipelineError::Extract(ExtractError::UnknownType(found)) => format!(
                "Could not tell what \"{found}\" is. Describe an expense, fuel log, task or issue."
            ),
            PipelineError::Extract(err) if err.is_malformed() => {
                "Could not understand the message. Please rephrase it and send again.".to_string()
            }
            PipelineError::Extract(_) => {
                "The extraction service is unavailable right now. Please try again later."
                    .to_string()
            }
            PipelineError::Validation(err) => err.operator_message(),
            PipelineError::Store(_) => {
                "Could not save the record. Please try again later.".to_string()
            }
            PipelineError::Timeout {
                collaborator,
                after,
            } => format!(
                "The {collaborator} did not respond within {}s. Please try again.",
                after.as_secs()
            ),
        }
    }
}
