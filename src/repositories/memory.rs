//! In-memory implementations of the persistence contracts, used by the service tests
//! and by embedding callers that keep the daily log elsewhere.

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use crate::errors::{CheckInError, CheckInResult};
use crate::models::{LoadRecord, LoadStatus};
use crate::repositories::block_list::BlockListRepository;
use crate::repositories::load_records::{AssignmentUpdate, LoadRecordRepository};

/// Keeps load records behind a `tokio::sync::RwLock`, enforcing the same
/// version-conditional write semantics a durable store would.
#[derive(Default)]
pub struct InMemoryLoadRepository {
    records: RwLock<HashMap<String, LoadRecord>>,
}

impl InMemoryLoadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with existing records, keyed by id.
    pub async fn seed(&self, records: impl IntoIterator<Item = LoadRecord>) {
        let mut store = self.records.write().await;
        for record in records {
            store.insert(record.id.clone(), record);
        }
    }

    fn check_version(record: &LoadRecord, expected: i64) -> CheckInResult<()> {
        if record.version != expected {
            return Err(CheckInError::StaleWrite {
                record_id: record.id.clone(),
                expected,
                found: record.version,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LoadRecordRepository for InMemoryLoadRepository {
    async fn active_records(&self) -> CheckInResult<Vec<LoadRecord>> {
        let store = self.records.read().await;
        Ok(store.values().filter(|r| r.is_active()).cloned().collect())
    }

    async fn find(&self, id: &str) -> CheckInResult<Option<LoadRecord>> {
        let store = self.records.read().await;
        Ok(store.get(id).cloned())
    }

    async fn insert(&self, record: &LoadRecord) -> CheckInResult<()> {
        let mut store = self.records.write().await;
        store.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn apply_assignment(&self, update: &AssignmentUpdate) -> CheckInResult<LoadRecord> {
        let mut store = self.records.write().await;
        let record = store
            .get_mut(&update.record_id)
            .ok_or_else(|| CheckInError::RecordNotFound(update.record_id.clone()))?;
        Self::check_version(record, update.expected_version)?;

        record.dock_number = Some(update.dock_number.clone());
        if update.appointment_time.is_some() {
            record.appointment_time = update.appointment_time.clone();
        }
        record.status = update.status;
        record.version += 1;
        Ok(record.clone())
    }

    async fn apply_status(
        &self,
        record_id: &str,
        expected_version: i64,
        status: LoadStatus,
        at: DateTime<Utc>,
    ) -> CheckInResult<LoadRecord> {
        let mut store = self.records.write().await;
        let record = store
            .get_mut(record_id)
            .ok_or_else(|| CheckInError::RecordNotFound(record_id.to_string()))?;
        Self::check_version(record, expected_version)?;

        record.apply_status(status, at);
        record.version += 1;
        Ok(record.clone())
    }
}

/// Keeps the block-list in a `DashMap`.
#[derive(Default)]
pub struct InMemoryBlockList {
    entries: DashMap<String, String>,
}

impl InMemoryBlockList {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlockListRepository for InMemoryBlockList {
    async fn all(&self) -> CheckInResult<HashMap<String, String>> {
        Ok(self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect())
    }

    async fn get(&self, dock_number: &str) -> CheckInResult<Option<String>> {
        Ok(self.entries.get(dock_number).map(|e| e.value().clone()))
    }

    async fn set(&self, dock_number: &str, reason: &str) -> CheckInResult<()> {
        self.entries
            .insert(dock_number.to_string(), reason.to_string());
        Ok(())
    }

    async fn remove(&self, dock_number: &str) -> CheckInResult<()> {
        self.entries.remove(dock_number);
        Ok(())
    }
}
