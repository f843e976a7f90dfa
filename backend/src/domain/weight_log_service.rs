//! Weight log service domain logic.
//!
//! Submitted weights arrive in whatever unit the user entered them in; this
//! service turns them into canonical kilograms before anything is stored.
use chrono::Utc;
use shared::{AnimalId, WeightEntryId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::{
    CreateWeightEntryCommand, DeleteWeightEntriesCommand, DeleteWeightEntriesResult,
    UpdateWeightEntryCommand,
};
use crate::domain::models::weight_entry::{
    canonical_weight_kg, validate_recorded_by, NewWeightEntry, WeightEntry,
    WeightEntryValidationError,
};
use crate::storage::{Connection, WeightLogStorage};

#[derive(Debug, thiserror::Error)]
pub enum WeightLogServiceError {
    #[error(transparent)]
    Validation(#[from] WeightEntryValidationError),
    #[error("Weight entry {0} not found")]
    NotFound(WeightEntryId),
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T> = std::result::Result<T, WeightLogServiceError>;

#[derive(Clone)]
pub struct WeightLogService<C: Connection> {
    weight_log_repository: C::WeightLogRepository,
}

impl<C: Connection> WeightLogService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let weight_log_repository = connection.create_weight_log_repository();
        Self { weight_log_repository }
    }

    pub async fn create_entry(&self, command: CreateWeightEntryCommand) -> ServiceResult<WeightEntry> {
        let weight_kg = canonical_weight_kg(command.weight, command.weight_unit)?;
        let recorded_by = validate_recorded_by(&command.recorded_by)?;

        let new_entry = NewWeightEntry {
            animal_id: command.animal_id,
            date: command.date,
            weight_kg,
            recorded_by,
            created_at: Utc::now(),
        };

        let stored = self.weight_log_repository.insert_entry(new_entry).await?;
        info!(
            "Created weight entry {} for animal {}: {} {} -> {} kg",
            stored.id, stored.animal_id, command.weight, command.weight_unit, stored.weight_kg
        );
        Ok(stored)
    }

    pub async fn update_entry(&self, command: UpdateWeightEntryCommand) -> ServiceResult<WeightEntry> {
        let weight_kg = canonical_weight_kg(command.weight, command.weight_unit)?;
        let recorded_by = validate_recorded_by(&command.recorded_by)?;

        let mut entry = self
            .weight_log_repository
            .get_entry(command.weight_id)
            .await?
            .ok_or(WeightLogServiceError::NotFound(command.weight_id))?;

        entry.date = command.date;
        entry.weight_kg = weight_kg;
        entry.recorded_by = recorded_by;

        if !self.weight_log_repository.update_entry(&entry).await? {
            // Deleted between the read and the write
            return Err(WeightLogServiceError::NotFound(command.weight_id));
        }

        info!(
            "Updated weight entry {}: {} {} -> {} kg",
            entry.id, command.weight, command.weight_unit, entry.weight_kg
        );
        Ok(entry)
    }

    pub async fn delete_entries(
        &self,
        command: DeleteWeightEntriesCommand,
    ) -> ServiceResult<DeleteWeightEntriesResult> {
        if command.ids.is_empty() {
            return Err(WeightEntryValidationError::NoIdsGiven.into());
        }

        let requested: Vec<WeightEntryId> = command
            .ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let deleted = self.weight_log_repository.delete_entries(&requested).await?;

        let not_found_ids: Vec<WeightEntryId> = requested
            .into_iter()
            .filter(|id| !deleted.contains(id))
            .collect();
        if !not_found_ids.is_empty() {
            warn!("Delete requested for unknown weight entries: {:?}", not_found_ids);
        }

        let success_message = match deleted.len() {
            0 => "No weight entries were deleted".to_string(),
            1 => "1 weight entry deleted successfully".to_string(),
            n => format!("{} weight entries deleted successfully", n),
        };

        Ok(DeleteWeightEntriesResult {
            deleted_count: deleted.len(),
            not_found_ids,
            success_message,
        })
    }

    pub async fn list_entries(&self, animal_id: AnimalId) -> ServiceResult<Vec<WeightEntry>> {
        Ok(self.weight_log_repository.list_entries(animal_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsvConnection;
    use chrono::NaiveDate;
    use shared::WeightUnit;
    use tempfile::TempDir;

    fn create_test_service() -> (WeightLogService<CsvConnection>, TempDir) {
        let dir = TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(dir.path()).unwrap());
        (WeightLogService::new(connection), dir)
    }

    fn create_command(weight: f64, unit: WeightUnit) -> CreateWeightEntryCommand {
        CreateWeightEntryCommand {
            animal_id: 42,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            weight,
            weight_unit: unit,
            recorded_by: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_in_kilograms() {
        let (service, _dir) = create_test_service();
        let entry = service.create_entry(create_command(10.0, WeightUnit::Kg)).await.unwrap();
        assert_eq!(entry.weight_kg, 10.0);
        assert_eq!(entry.recorded_by, "alice");
        assert_eq!(entry.animal_id, 42);
    }

    #[tokio::test]
    async fn test_create_in_pounds_persists_kilograms() {
        let (service, _dir) = create_test_service();
        let entry = service.create_entry(create_command(22.0, WeightUnit::Lb)).await.unwrap();
        assert!((entry.weight_kg - 9.979).abs() < 0.001);

        let listed = service.list_entries(42).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!((listed[0].weight_kg - 9.979).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_weight() {
        let (service, _dir) = create_test_service();
        let result = service.create_entry(create_command(-3.0, WeightUnit::Kg)).await;
        assert!(matches!(
            result,
            Err(WeightLogServiceError::Validation(WeightEntryValidationError::NegativeWeight))
        ));
        assert!(service.list_entries(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_recorded_by() {
        let (service, _dir) = create_test_service();
        let mut command = create_command(5.0, WeightUnit::Kg);
        command.recorded_by = "  ".to_string();
        assert!(matches!(
            service.create_entry(command).await,
            Err(WeightLogServiceError::Validation(WeightEntryValidationError::MissingRecordedBy))
        ));
    }

    #[tokio::test]
    async fn test_update_preserves_created_at_and_animal() {
        let (service, _dir) = create_test_service();
        let created = service.create_entry(create_command(10.0, WeightUnit::Kg)).await.unwrap();

        let updated = service
            .update_entry(UpdateWeightEntryCommand {
                weight_id: created.id,
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                weight: 33.0,
                weight_unit: WeightUnit::Lb,
                recorded_by: "bob".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.animal_id, 42);
        assert_eq!(updated.recorded_by, "bob");
        assert!((updated.weight_kg - 14.9686).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_update_unknown_entry() {
        let (service, _dir) = create_test_service();
        let result = service
            .update_entry(UpdateWeightEntryCommand {
                weight_id: 99,
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                weight: 1.0,
                weight_unit: WeightUnit::Kg,
                recorded_by: "bob".to_string(),
            })
            .await;
        assert!(matches!(result, Err(WeightLogServiceError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_reports_not_found() {
        let (service, _dir) = create_test_service();
        for _ in 0..3 {
            service.create_entry(create_command(10.0, WeightUnit::Kg)).await.unwrap();
        }

        let result = service
            .delete_entries(DeleteWeightEntriesCommand { ids: vec![3, 1, 3, 8] })
            .await
            .unwrap();

        assert_eq!(result.deleted_count, 2);
        assert_eq!(result.not_found_ids, vec![8]);
        assert_eq!(result.success_message, "2 weight entries deleted successfully");
        let remaining: Vec<_> = service.list_entries(42).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![2]);
    }

    #[tokio::test]
    async fn test_delete_requires_ids() {
        let (service, _dir) = create_test_service();
        let result = service.delete_entries(DeleteWeightEntriesCommand { ids: vec![] }).await;
        assert!(matches!(
            result,
            Err(WeightLogServiceError::Validation(WeightEntryValidationError::NoIdsGiven))
        ));
    }
}
