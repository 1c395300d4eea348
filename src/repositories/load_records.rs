//! # Load Record Persistence Contract

//! The core is agnostic to storage technology; it only requires that the write which
//! commits a dock assignment is conditional on the record's prior version. Two racing
//! assignments to the same dock both pass through the validator's decision table, and
//! the loser of the write race surfaces as `StaleWrite` so its caller re-fetches
//! occupancy and re-validates instead of silently overwriting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::CheckInResult;
use crate::models::{LoadRecord, LoadStatus};

/// The fields a committed assignment writes to a load record, conditioned on the
/// version the caller validated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    pub record_id: String,
    /// The record version the occupancy snapshot was taken at.
    pub expected_version: i64,
    pub dock_number: String,
    pub appointment_time: Option<String>,
    /// The status the record moves to with the assignment, normally `assigned`.
    pub status: LoadStatus,
}

/// Defines the asynchronous persistence interface for load check-in records.
#[async_trait]
pub trait LoadRecordRepository: Send + Sync {
    /// Lists every record that currently occupies a dock (active status, dock set).
    async fn active_records(&self) -> CheckInResult<Vec<LoadRecord>>;

    /// Fetches a single record by id.
    async fn find(&self, id: &str) -> CheckInResult<Option<LoadRecord>>;

    /// Inserts a newly checked-in record.
    async fn insert(&self, record: &LoadRecord) -> CheckInResult<()>;

    /// Applies a conditional assignment update.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadRecord)`: the updated record with its incremented version
    /// * `Err(CheckInError::StaleWrite)` if the stored version differs from
    ///   `expected_version`
    /// * `Err(CheckInError::RecordNotFound)` if the record does not exist
    async fn apply_assignment(&self, update: &AssignmentUpdate) -> CheckInResult<LoadRecord>;

    /// Applies a conditional lifecycle status change, stamping the matching timestamp
    /// (loading start, completion, check-out). Same version semantics as
    /// `apply_assignment`.
    async fn apply_status(
        &self,
        record_id: &str,
        expected_version: i64,
        status: LoadStatus,
        at: DateTime<Utc>,
    ) -> CheckInResult<LoadRecord>;
}
