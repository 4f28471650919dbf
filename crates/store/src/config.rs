use std::sync::Arc;

use records::RecordType;
use serde::{Deserialize, Serialize};

use crate::{AirtableStore, InMemoryStore, RecordStore, StoreError};

/// Which [`RecordStore`] implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Airtable,
    /// Dry run: rows are kept in process memory.
    #[default]
    Memory,
}

/// Store table name per record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub expense: String,
    pub fuel: String,
    pub task: String,
    pub issue: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            expense: "Petty Cash".into(),
            fuel: "Fuel Logs".into(),
            task: "Tasks".into(),
            issue: "Issues".into(),
        }
    }
}

impl TableNames {
    pub fn for_type(&self, record_type: RecordType) -> &str {
        match record_type {
            RecordType::Expense => &self.expense,
            RecordType::Fuel => &self.fuel,
            RecordType::Task => &self.task,
            RecordType::Issue => &self.issue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub api_url: String,
    pub base_id: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub tables: TableNames,
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            api_url: "https://api.airtable.com/v0".into(),
            base_id: None,
            api_key: None,
            tables: TableNames::default(),
            connect_timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), StoreError> {
        for t in RecordType::ALL {
            if self.tables.for_type(t).trim().is_empty() {
                return Err(StoreError::InvalidConfig(format!(
                    "table name for {t} must not be empty"
                )));
            }
        }
        if self.backend == StoreBackend::Airtable {
            if self.api_url.trim().is_empty() {
                return Err(StoreError::InvalidConfig("api_url must not be empty".into()));
            }
            if self.base_id.as_deref().map_or(true, |b| b.trim().is_empty()) {
                return Err(StoreError::InvalidConfig(
                    "airtable backend requires base_id".into(),
                ));
            }
            if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                return Err(StoreError::InvalidConfig(
                    "airtable backend requires api_key".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Arc<dyn RecordStore>, StoreError> {
        self.validate()?;
        match self.backend {
            StoreBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
            StoreBackend::Airtable => Ok(Arc::new(AirtableStore::new(self)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables() {
        let tables = TableNames::default();
        assert_eq!(tables.for_type(RecordType::Expense), "Petty Cash");
        assert_eq!(tables.for_type(RecordType::Fuel), "Fuel Logs");
        assert_eq!(tables.for_type(RecordType::Task), "Tasks");
        assert_eq!(tables.for_type(RecordType::Issue), "Issues");
    }

    #[test]
    fn memory_backend_needs_no_credentials() {
        let cfg = StoreConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.build().is_ok());
    }

    #[test]
    fn airtable_requires_base_and_key() {
        let mut cfg = StoreConfig {
            backend: StoreBackend::Airtable,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(StoreError::InvalidConfig(_))));

        cfg.base_id = Some("appXYZ".into());
        assert!(cfg.validate().is_err());

        cfg.api_key = Some("key".into());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn blank_table_name_rejected() {
        let mut cfg = StoreConfig::default();
        cfg.tables.task = " ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn api_key_is_never_serialized() {
        let cfg = StoreConfig {
            api_key: Some("secret".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("secret"));
    }
}
