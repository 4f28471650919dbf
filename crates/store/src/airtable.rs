use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{RecordStore, RowPayload, StoreConfig, StoreError};

/// Writes rows through the Airtable REST API.
#[derive(Debug, Clone)]
pub struct AirtableStore {
    client: reqwest::Client,
    api_url: Url,
    base_id: String,
    api_key: String,
}

impl AirtableStore {
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let api_url = Url::parse(cfg.api_url.trim())
            .map_err(|e| StoreError::InvalidConfig(format!("api_url: {e}")))?;
        let base_id = cfg
            .base_id
            .clone()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| StoreError::InvalidConfig("airtable backend requires base_id".into()))?;
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| StoreError::InvalidConfig("airtable backend requires api_key".into()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()
            .map_err(|e| StoreError::InvalidConfig(format!("http client: {e}")))?;
        Ok(Self {
            client,
            api_url,
            base_id,
            api_key,
        })
    }

    /// `<api_url>/<base_id>/<table>`, with the table name percent-encoded.
    pub fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidConfig("api_url cannot be a base".into()))?
            .pop_if_empty()
            .push(&self.base_id)
            .push(table);
        Ok(url)
    }
}

/// Pulls the created record's `id` out of the response body.
pub(crate) fn created_id(body: &Value) -> Result<String, StoreError> {
    body.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::MalformedResponse("response has no record id".into()))
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn create(&self, table: &str, row: &RowPayload) -> Result<String, StoreError> {
        let url = self.table_url(table)?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&row.to_fields_body())
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), table, "store.http_error");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(format!("invalid JSON body: {e}")))?;
        let id = created_id(&body)?;
        debug!(table, id = %id, "store.record_created");
        Ok(id)
    }
}
