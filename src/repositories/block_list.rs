//! # Block-List Persistence Contract

//! The block-list is external key-value state (dock number -> operator reason). The
//! core only needs get-all/get-one/set/delete semantics and read-modify-write
//! consistency; where the entries actually live (durable table, cache, local file) is
//! the collaborator's concern.

use std::collections::HashMap;
use async_trait::async_trait;
use crate::errors::CheckInResult;

/// Defines the asynchronous interface to the dock block-list.
#[async_trait]
pub trait BlockListRepository: Send + Sync {
    /// Returns every block entry, keyed by dock number.
    async fn all(&self) -> CheckInResult<HashMap<String, String>>;

    /// Returns the block reason for a dock, if one is set.
    async fn get(&self, dock_number: &str) -> CheckInResult<Option<String>>;

    /// Adds or overwrites the block entry for a dock.
    async fn set(&self, dock_number: &str, reason: &str) -> CheckInResult<()>;

    /// Removes the block entry for a dock. Removing an absent entry is a no-op.
    async fn remove(&self, dock_number: &str) -> CheckInResult<()>;
}
