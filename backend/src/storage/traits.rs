//! # Storage Traits
//!
//! Abstractions that let the domain layer work against any storage backend.

use anyhow::Result;
use async_trait::async_trait;
use shared::{AnimalId, WeightEntryId};

use crate::domain::models::weight_entry::{NewWeightEntry, WeightEntry};

/// Interface for weight log storage operations
#[async_trait]
pub trait WeightLogStorage: Send + Sync {
    /// Store a new entry, assigning it the next free id
    async fn insert_entry(&self, entry: NewWeightEntry) -> Result<WeightEntry>;

    /// Retrieve a specific entry by id
    async fn get_entry(&self, id: WeightEntryId) -> Result<Option<WeightEntry>>;

    /// List every entry for an animal, newest first
    async fn list_entries(&self, animal_id: AnimalId) -> Result<Vec<WeightEntry>>;

    /// Replace an existing entry.
    /// Returns false if no entry with that id exists
    async fn update_entry(&self, entry: &WeightEntry) -> Result<bool>;

    /// Delete entries by id.
    /// Returns the ids that were actually found and removed
    async fn delete_entries(&self, ids: &[WeightEntryId]) -> Result<Vec<WeightEntryId>>;
}

/// A storage connection that can hand out repositories
pub trait Connection: Send + Sync + Clone {
    /// The type of WeightLogStorage this connection creates
    type WeightLogRepository: WeightLogStorage + Clone;

    /// Create a new weight log repository for this connection
    fn create_weight_log_repository(&self) -> Self::WeightLogRepository;
}
