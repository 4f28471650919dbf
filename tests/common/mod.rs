#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use opslog::{
    ExtractError, ExtractionRequest, ExtractionService, InMemoryStore, Pipeline, RecordStore,
    RowPayload, StoreError, StubExtractor,
};

/// Monday.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
}

/// Pipeline over a canned extractor and a fresh in-memory store.
pub fn canned_pipeline(responses: &[(&str, &str)]) -> (Pipeline, Arc<InMemoryStore>) {
    let stub = responses
        .iter()
        .fold(StubExtractor::new(), |stub, (text, payload)| {
            stub.with_response(text, *payload)
        });
    let store = Arc::new(InMemoryStore::new());
    (Pipeline::new(Arc::new(stub), store.clone()), store)
}

/// Extractor that always fails the same way.
pub struct FailingExtractor(pub ExtractError);

#[async_trait]
impl ExtractionService for FailingExtractor {
    async fn complete(&self, _request: &ExtractionRequest) -> Result<String, ExtractError> {
        Err(self.0.clone())
    }
}

/// Extractor that answers after `delay`.
pub struct SlowExtractor {
    pub delay: Duration,
    pub payload: String,
}

#[async_trait]
impl ExtractionService for SlowExtractor {
    async fn complete(&self, _request: &ExtractionRequest) -> Result<String, ExtractError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.payload.clone())
    }
}

/// Store that rejects every write and counts the attempts.
#[derive(Default)]
pub struct RejectingStore {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl RecordStore for RejectingStore {
    async fn create(&self, _table: &str, _row: &RowPayload) -> Result<String, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Rejected {
            status: 422,
            body: "INVALID_VALUE_FOR_COLUMN".into(),
        })
    }
}

/// Store that answers after `delay`.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl RecordStore for SlowStore {
    async fn create(&self, _table: &str, _row: &RowPayload) -> Result<String, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok("recSlow".into())
    }
}
