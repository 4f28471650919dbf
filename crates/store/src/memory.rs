use std::sync::{RwLock, RwLockReadGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{RecordStore, RowPayload, StoreError};

/// A row written to an [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub id: String,
    pub table: String,
    pub row: RowPayload,
}

/// Keeps written rows in a `RwLock<Vec<_>>`. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<Vec<StoredRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<StoredRow>>, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))
    }

    /// Snapshot of every row written so far, in write order.
    pub fn rows(&self) -> Result<Vec<StoredRow>, StoreError> {
        Ok(self.read()?.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create(&self, table: &str, row: &RowPayload) -> Result<String, StoreError> {
        let id = format!("rec{}", &Uuid::new_v4().simple().to_string()[..14]);
        self.rows
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .push(StoredRow {
                id: id.clone(),
                table: table.to_string(),
                row: row.clone(),
            });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::RecordType;
    use std::collections::BTreeMap;

    fn row() -> RowPayload {
        RowPayload {
            record_type: RecordType::Issue,
            columns: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let store = InMemoryStore::new();
        let a = store.create("Issues", &row()).await.unwrap();
        let b = store.create("Issues", &row()).await.unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with("rec"));
        assert_eq!(a.len(), 17);

        let rows = store.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, a);
        assert_eq!(rows[0].table, "Issues");
    }

    #[test]
    fn starts_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn poisoned_lock_is_an_error_not_an_empty_store() {
        let store = std::sync::Arc::new(InMemoryStore::new());
        let writer = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.rows.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Backend(_))));
        assert!(store.is_empty().is_err());
        assert!(store.rows().is_err());
    }
}
