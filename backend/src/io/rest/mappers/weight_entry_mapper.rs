use shared::{
    CreateWeightEntryRequest, DeleteWeightEntriesRequest, DeleteWeightEntriesResponse,
    UpdateWeightEntryRequest, WeightEntry as SharedWeightEntry,
};

use crate::domain::commands::{
    CreateWeightEntryCommand, DeleteWeightEntriesCommand, DeleteWeightEntriesResult,
    UpdateWeightEntryCommand,
};
use crate::domain::models::weight_entry::WeightEntry as DomainWeightEntry;

/// Maps between the public weight log DTOs and domain types
pub struct WeightEntryMapper;

impl WeightEntryMapper {
    pub fn to_dto(entry: DomainWeightEntry) -> SharedWeightEntry {
        SharedWeightEntry {
            id: entry.id,
            animal_id: entry.animal_id,
            date: entry.date,
            weight_kg: entry.weight_kg,
            recorded_by: entry.recorded_by,
            created_at: entry.created_at,
        }
    }

    pub fn to_create_command(request: CreateWeightEntryRequest) -> CreateWeightEntryCommand {
        CreateWeightEntryCommand {
            animal_id: request.animal_id,
            date: request.date,
            weight: request.weight,
            weight_unit: request.weight_unit,
            recorded_by: request.recorded_by,
        }
    }

    pub fn to_update_command(request: UpdateWeightEntryRequest) -> UpdateWeightEntryCommand {
        UpdateWeightEntryCommand {
            weight_id: request.weight_id,
            date: request.date,
            weight: request.weight,
            weight_unit: request.weight_unit,
            recorded_by: request.recorded_by,
        }
    }

    pub fn to_delete_command(request: DeleteWeightEntriesRequest) -> DeleteWeightEntriesCommand {
        DeleteWeightEntriesCommand { ids: request.ids }
    }

    pub fn to_delete_response(result: DeleteWeightEntriesResult) -> DeleteWeightEntriesResponse {
        DeleteWeightEntriesResponse {
            deleted_count: result.deleted_count,
            success_message: result.success_message,
            not_found_ids: result.not_found_ids,
        }
    }
}
