//! YAML configuration for the opslog pipeline.
//!
//! Every stage section is optional and falls back to its defaults. Secrets
//! are normally injected from the environment rather than written to the
//! file: `OPSLOG_EXTRACT_API_KEY`, `OPSLOG_STORE_API_KEY` and
//! `OPSLOG_STORE_BASE_ID` override the corresponding file values.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! extract:
//!   mode: "api"
//!   model: "gpt-4o-mini"
//!   temperature: 0.1
//!
//! store:
//!   backend: "airtable"
//!   tables:
//!     expense: "Petty Cash"
//!     fuel: "Fuel Logs"
//!     task: "Tasks"
//!     issue: "Issues"
//!
//! corrector:
//!   default_operator: "Operator"
//!   high_severity_terms: ["urgent", "critical", "emergency"]
//!
//! confirm:
//!   currency: "MWK"
//!
//! pipeline:
//!   extract_timeout_secs: 30
//!   store_timeout_secs: 15
//!   utc_offset_hours: 2
//!   entry_separator: ";"
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Utc};
use correct::CorrectorPolicy;
use extract::ExtractConfig;
use serde::{Deserialize, Serialize};
use store::StoreConfig;
use thiserror::Error;

use crate::confirm::ConfirmConfig;

pub const ENV_EXTRACT_API_KEY: &str = "OPSLOG_EXTRACT_API_KEY";
pub const ENV_STORE_API_KEY: &str = "OPSLOG_STORE_API_KEY";
pub const ENV_STORE_BASE_ID: &str = "OPSLOG_STORE_BASE_ID";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpsConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub corrector: CorrectorPolicy,

    #[serde(default)]
    pub confirm: ConfirmConfig,

    #[serde(default)]
    pub pipeline: PipelineSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OpsConfig {
    /// Load a YAML configuration file, applying environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string, applying environment overrides.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        Self::from_yaml_with(yaml, |key| std::env::var(key).ok())
    }

    /// Parse YAML with overrides looked up through `lookup` instead of the
    /// process environment.
    pub fn from_yaml_with<F>(yaml: &str, lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: OpsConfig = serde_yaml::from_str(yaml)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(ENV_EXTRACT_API_KEY) {
            self.extract.api_key = Some(key);
        }
        if let Some(key) = non_empty(ENV_STORE_API_KEY) {
            self.store.api_key = Some(key);
        }
        if let Some(base) = non_empty(ENV_STORE_BASE_ID) {
            self.store.base_id = Some(base);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.extract
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("extract: {e}")))?;
        self.store
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("store: {e}")))?;
        self.corrector
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("corrector: {e}")))?;
        self.confirm.validate()?;
        self.pipeline.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            extract: ExtractConfig::default(),
            store: StoreConfig::default(),
            corrector: CorrectorPolicy::default(),
            confirm: ConfirmConfig::default(),
            pipeline: PipelineSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Collaborator deadlines, the operator's time zone and entry splitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub extract_timeout_secs: u64,
    pub store_timeout_secs: u64,
    /// Fixed offset of the operators' local day, used for "current date".
    pub utc_offset_hours: i32,
    /// Splits one message into independent entries.
    pub entry_separator: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            extract_timeout_secs: 30,
            store_timeout_secs: 15,
            utc_offset_hours: 2,
            entry_separator: ";".to_string(),
        }
    }
}

impl PipelineSettings {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.extract_timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "pipeline.extract_timeout_secs must be >= 1".to_string(),
            ));
        }
        if self.store_timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "pipeline.store_timeout_secs must be >= 1".to_string(),
            ));
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ConfigLoadError::Validation(format!(
                "pipeline.utc_offset_hours {} outside -12..=14",
                self.utc_offset_hours
            )));
        }
        if self.entry_separator.is_empty() {
            return Err(ConfigLoadError::Validation(
                "pipeline.entry_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Today in the operators' time zone.
    pub fn current_date(&self) -> NaiveDate {
        let now = Utc::now();
        match FixedOffset::east_opt(self.utc_offset_hours * 3600) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.date_naive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
