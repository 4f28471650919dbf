use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use correct::{correct, CorrectionNote, CorrectorPolicy};
use extract::{extract, ChatCompletionsExtractor, ExtractionRequest, ExtractionService, StubExtractor};
use futures::future::join_all;
use records::Candidate;
use store::{map_to_store_columns, RecordStore, RowPayload, TableNames};
use tracing::{info, info_span, warn, Instrument};
use validate::{validate, ValidatedRecord, ValidationError};

use crate::config::{ConfigLoadError, OpsConfig, PipelineSettings};
use crate::confirm::{self, ConfirmConfig};
use crate::{Collaborator, PipelineError};

/// Output of the pure part of the pipeline for one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub record: ValidatedRecord,
    pub row: RowPayload,
    pub notes: Vec<CorrectionNote>,
}

/// correct → validate → map. No I/O; identical inputs give identical rows.
pub fn prepare_row(
    candidate: Candidate,
    raw_text: &str,
    current_date: NaiveDate,
    policy: &CorrectorPolicy,
) -> Result<PreparedRow, ValidationError> {
    let correction = correct(candidate, raw_text, current_date, policy);
    let record = validate(correction.record)?;
    let row = map_to_store_columns(&record);
    Ok(PreparedRow {
        record,
        row,
        notes: correction.notes,
    })
}

/// One entry written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub id: String,
    pub table: String,
    pub record: ValidatedRecord,
    pub row: RowPayload,
    pub notes: Vec<CorrectionNote>,
    pub confirmation: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Stored(StoredEntry),
    Failed { entry: String, error: PipelineError },
}

impl EntryOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, EntryOutcome::Stored(_))
    }
}

/// Per-entry results for one inbound message, in message order.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl MessageReport {
    pub fn stored(&self) -> impl Iterator<Item = &StoredEntry> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Stored(entry) => Some(entry),
            EntryOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &PipelineError> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Failed { error, .. } => Some(error),
            EntryOutcome::Stored(_) => None,
        })
    }

    /// The reply sent back to the operator.
    pub fn render(&self) -> String {
        match self.outcomes.as_slice() {
            [] => format!("❌ {}", PipelineError::EmptyMessage.operator_message()),
            [EntryOutcome::Stored(entry)] => {
                format!("✅ {} (Record ID: {})", entry.confirmation, entry.id)
            }
            [EntryOutcome::Failed { error, .. }] => format!("❌ {}", error.operator_message()),
            outcomes => {
                let total = outcomes.len();
                let stored = self.stored().count();
                let mut lines = Vec::with_capacity(total + 1);
                if stored > 0 {
                    lines.push(format!("✅ Logged {stored} of {total} entries:"));
                } else {
                    lines.push(format!("❌ None of the {total} entries could be logged:"));
                }
                for (n, outcome) in outcomes.iter().enumerate() {
                    let n = n + 1;
                    match outcome {
                        EntryOutcome::Stored(entry) => lines.push(format!(
                            "{n}. {} {} (ID: {})",
                            confirm::emoji(entry.record.record_type()),
                            entry.summary,
                            entry.id
                        )),
                        EntryOutcome::Failed { entry, error } => lines.push(format!(
                            "{n}. ❌ \"{entry}\": {}",
                            error.operator_message()
                        )),
                    }
                }
                lines.join("\n")
            }
        }
    }
}

/// The end-to-end pipeline. Holds no per-message state; one instance can
/// serve any number of concurrent messages.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Arc<dyn ExtractionService>,
    store: Arc<dyn RecordStore>,
    policy: CorrectorPolicy,
    tables: TableNames,
    confirm: ConfirmConfig,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(extractor: Arc<dyn ExtractionService>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            extractor,
            store,
            policy: CorrectorPolicy::default(),
            tables: TableNames::default(),
            confirm: ConfirmConfig::default(),
            settings: PipelineSettings::default(),
        }
    }

    /// Builds both collaborators from configuration.
    pub fn from_config(cfg: &OpsConfig) -> Result<Self, ConfigLoadError> {
        let extractor: Arc<dyn ExtractionService> = match cfg.extract.mode.as_str() {
            "stub" => Arc::new(StubExtractor::new()),
            _ => Arc::new(
                ChatCompletionsExtractor::new(cfg.extract.clone())
                    .map_err(|e| ConfigLoadError::Validation(format!("extract: {e}")))?,
            ),
        };
        let store = cfg
            .store
            .build()
            .map_err(|e| ConfigLoadError::Validation(format!("store: {e}")))?;

        Ok(Self::new(extractor, store)
            .with_policy(cfg.corrector.clone())
            .with_tables(cfg.store.tables.clone())
            .with_confirm(cfg.confirm.clone())
            .with_settings(cfg.pipeline.clone()))
    }

    pub fn with_policy(mut self, policy: CorrectorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tables(mut self, tables: TableNames) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_confirm(mut self, confirm: ConfirmConfig) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs one entry through every stage. The store is only called once the
    /// record has validated.
    pub async fn process_entry(
        &self,
        raw_text: &str,
        current_date: NaiveDate,
    ) -> Result<StoredEntry, PipelineError> {
        let start = Instant::now();
        let span = info_span!("opslog.entry", entry_len = raw_text.len(), current_date = %current_date);

        async {
            match self.run_entry(raw_text, current_date).await {
                Ok(entry) => {
                    let elapsed_micros = start.elapsed().as_micros();
                    info!(
                        record_type = %entry.record.record_type(),
                        table = %entry.table,
                        record_id = %entry.id,
                        corrections = entry.notes.len(),
                        elapsed_micros,
                        "entry_success"
                    );
                    Ok(entry)
                }
                Err(err) => {
                    let elapsed_micros = start.elapsed().as_micros();
                    warn!(
                        error_kind = err.kind(),
                        error = %err,
                        elapsed_micros,
                        "entry_failure"
                    );
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_entry(
        &self,
        raw_text: &str,
        current_date: NaiveDate,
    ) -> Result<StoredEntry, PipelineError> {
        let raw_text = raw_text.trim();
        if raw_text.is_empty() {
            return Err(PipelineError::EmptyMessage);
        }

        let request =
            ExtractionRequest::new(raw_text, current_date, &self.policy.default_operator);
        let after = self.settings.extract_timeout();
        let candidate = tokio::time::timeout(after, extract(self.extractor.as_ref(), &request))
            .await
            .map_err(|_| PipelineError::Timeout {
                collaborator: Collaborator::Extractor,
                after,
            })??;

        let PreparedRow { record, row, notes } =
            prepare_row(candidate, raw_text, current_date, &self.policy)?;

        let table = self.tables.for_type(record.record_type()).to_string();
        let after = self.settings.store_timeout();
        let id = tokio::time::timeout(after, self.store.create(&table, &row))
            .await
            .map_err(|_| PipelineError::Timeout {
                collaborator: Collaborator::Store,
                after,
            })??;

        let confirmation = confirm::render(&record, &self.confirm);
        let summary = confirm::summary(&record, &self.confirm);
        Ok(StoredEntry {
            id,
            table,
            record,
            row,
            notes,
            confirmation,
            summary,
        })
    }

    /// Splits `message` on the entry separator and processes every entry
    /// independently. Entries run concurrently; the report keeps message order.
    pub async fn process_message(&self, message: &str, current_date: NaiveDate) -> MessageReport {
        let entries = split_entries(message, &self.settings.entry_separator);
        if entries.is_empty() {
            return MessageReport {
                outcomes: vec![EntryOutcome::Failed {
                    entry: String::new(),
                    error: PipelineError::EmptyMessage,
                }],
            };
        }

        let results = join_all(
            entries
                .iter()
                .map(|entry| self.process_entry(entry, current_date)),
        )
        .await;

        let outcomes = entries
            .into_iter()
            .zip(results)
            .map(|(entry, result)| match result {
                Ok(stored) => EntryOutcome::Stored(stored),
                Err(error) => EntryOutcome::Failed {
                    entry: entry.to_string(),
                    error,
                },
            })
            .collect();
        MessageReport { outcomes }
    }

    /// Processes `message` against today's date in the configured time zone
    /// and renders the reply.
    pub async fn handle(&self, message: &str) -> String {
        let today = self.settings.current_date();
        self.process_message(message, today).await.render()
    }
}

fn split_entries<'a>(message: &'a str, separator: &str) -> Vec<&'a str> {
    message
        .split(separator)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::RecordType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    #[test]
    fn split_drops_blank_entries() {
        assert_eq!(
            split_entries(" Spent 500 on tea ; ;Hilux 40 liters ", ";"),
            ["Spent 500 on tea", "Hilux 40 liters"]
        );
        assert!(split_entries(" ; ", ";").is_empty());
        assert_eq!(split_entries("a | b", "|"), ["a", "b"]);
    }

    #[test]
    fn prepare_row_rejects_before_mapping() {
        let candidate = Candidate::new(RecordType::Expense).with("description", "Tea");
        let err = prepare_row(candidate, "bought tea", today(), &CorrectorPolicy::default())
            .unwrap_err();
        assert_eq!(err.fields(), ["amount"]);
    }

    #[test]
    fn empty_report_renders_empty_message() {
        let report = MessageReport { outcomes: vec![] };
        assert!(report.render().starts_with("❌ Message is empty"));
    }
}
