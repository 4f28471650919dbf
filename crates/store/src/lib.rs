//! Opslog store mapper and record store clients.
//!
//! [`map_to_store_columns`] turns a [`ValidatedRecord`](validate::ValidatedRecord)
//! into a [`RowPayload`] keyed by the store's own column names. It is a pure,
//! total function over static per-type tables; fields with no column are
//! dropped.
//!
//! Writing the row is the job of a [`RecordStore`], a single async
//! request/response method that returns the id the store assigned:
//!
//! - [`AirtableStore`] posts `{"fields": ...}` to the Airtable REST API.
//! - [`InMemoryStore`] keeps rows in process memory for dry runs and tests.
//!
//! Failed writes are reported as [`StoreError`] and never retried here.

use async_trait::async_trait;

mod airtable;
mod config;
mod error;
mod mapper;
mod memory;

pub use crate::airtable::AirtableStore;
pub use crate::config::{StoreBackend, StoreConfig, TableNames};
pub use crate::error::StoreError;
pub use crate::mapper::{
    column_value, map_to_store_columns, table_columns, ColumnEncoding, ColumnSpec, RowPayload,
};
pub use crate::memory::{InMemoryStore, StoredRow};

/// The external record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes one row to `table` and returns the identifier the store assigned.
    async fn create(&self, table: &str, row: &RowPayload) -> Result<String, StoreError>;
}
