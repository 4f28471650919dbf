//! Opslog record layer.
//!
//! Every operator message ends up as exactly one of four record kinds:
//! expense, fuel log, task, or issue. This crate defines the shapes those
//! records take while they move through the pipeline, plus the static field
//! schema registry every later stage consults.
//!
//! ## Record lifecycle
//!
//! ```text
//! extractor payload ──► Candidate ──► NormalizedRecord ──► (validate) ──► (store)
//!                       type + loose     type final,
//!                       fields, no date  date populated
//! ```
//!
//! - [`Candidate`] is whatever the external extractor guessed. Its `date` may be
//!   missing and its fields may belong to a different record type.
//! - [`NormalizedRecord`] is produced by the corrector. Its type is final and
//!   its `date` is always populated.
//!
//! ## Schema registry
//!
//! [`schema_for`] returns the immutable [`RecordSchema`] for a [`RecordType`]:
//! required and optional fields, the kind of value each holds, the allowed
//! values for enumerated fields, and defaults. The tables are `static` and
//! never change after startup, so they can be shared freely across threads.

mod dates;
mod error;
mod schema;
mod types;

pub use crate::dates::next_weekday;
pub use crate::error::RecordTypeError;
pub use crate::schema::{
    schema_for, value_kind, FieldDefault, FieldSpec, RecordSchema, ValueKind, EXPENSE_PERSON,
    ISSUE_CATEGORIES, ISSUE_SEVERITIES, ISSUE_STATUSES, TASK_STATUSES, VEHICLES,
};
pub use crate::types::{Candidate, FieldMap, FieldValue, NormalizedRecord, RecordType};

/// Canonical date format used on every boundary (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
