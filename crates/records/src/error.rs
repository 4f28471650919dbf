use thiserror::Error;

/// Raised when a record type discriminator does not name one of the four kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown record type `{0}` (expected expense, fuel, task or issue)")]
pub struct RecordTypeError(pub String);
