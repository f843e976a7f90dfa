//! # REST API for the Weight Log
//!
//! Endpoints for listing, creating, updating and deleting weight entries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{
    AnimalId, CreateWeightEntryRequest, CreateWeightEntryResponse, DeleteWeightEntriesRequest,
    UpdateWeightEntryRequest, UpdateWeightEntryResponse, WeightEntryId, WeightEntryListResponse,
};
use tracing::{error, info, warn};

use super::mappers::weight_entry_mapper::WeightEntryMapper;
use crate::domain::models::weight_entry::WeightEntryValidationError;
use crate::domain::WeightLogServiceError;
use crate::AppState;

/// List every weight entry for an animal, newest first
pub async fn list_weight_entries(
    State(state): State<AppState>,
    Path(animal_id): Path<AnimalId>,
) -> Response {
    info!("GET /api/animals/{}/weight_log", animal_id);

    match state.weight_log_service.list_entries(animal_id).await {
        Ok(entries) => {
            let response = WeightEntryListResponse {
                entries: entries.into_iter().map(WeightEntryMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list weight entries", e),
    }
}

/// Record a new weight entry
pub async fn create_weight_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateWeightEntryRequest>,
) -> Response {
    info!("POST /api/animal_weight_log - request: {:?}", request);

    let command = WeightEntryMapper::to_create_command(request);
    match state.weight_log_service.create_entry(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(CreateWeightEntryResponse { id: entry.id })).into_response(),
        Err(e) => error_response("create weight entry", e),
    }
}

/// Correct an existing weight entry
pub async fn update_weight_entry(
    State(state): State<AppState>,
    Path(weight_id): Path<WeightEntryId>,
    Json(request): Json<UpdateWeightEntryRequest>,
) -> Response {
    info!("PUT /api/animal_weight_log/{} - request: {:?}", weight_id, request);

    if request.weight_id != weight_id {
        let mismatch = WeightEntryValidationError::MismatchedId {
            path: weight_id,
            body: request.weight_id,
        };
        return error_response("update weight entry", mismatch.into());
    }

    let command = WeightEntryMapper::to_update_command(request);
    match state.weight_log_service.update_entry(command).await {
        Ok(entry) => {
            let response = UpdateWeightEntryResponse {
                success_message: format!("Weight entry {} updated", entry.id),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update weight entry", e),
    }
}

/// Delete several weight entries in one request
pub async fn delete_weight_entries(
    State(state): State<AppState>,
    Json(request): Json<DeleteWeightEntriesRequest>,
) -> Response {
    info!("DELETE /api/animal_weight_log - request: {:?}", request);

    let command = WeightEntryMapper::to_delete_command(request);
    match state.weight_log_service.delete_entries(command).await {
        Ok(result) => (StatusCode::OK, Json(WeightEntryMapper::to_delete_response(result))).into_response(),
        Err(e) => error_response("delete weight entries", e),
    }
}

fn error_response(action: &str, e: WeightLogServiceError) -> Response {
    match e {
        WeightLogServiceError::Validation(_) => {
            warn!("Rejected request to {}: {}", action, e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        WeightLogServiceError::NotFound(_) => {
            warn!("Failed to {}: {}", action, e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        WeightLogServiceError::Storage(_) => {
            error!("Failed to {}: {}", action, e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error trying to {}", action)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeightLogService;
    use crate::storage::CsvConnection;
    use axum::body::to_bytes;
    use chrono::NaiveDate;
    use shared::WeightUnit;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup_test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(dir.path()).unwrap());
        let state = AppState {
            weight_log_service: WeightLogService::new(connection),
        };
        (state, dir)
    }

    fn create_request(weight: f64, unit: WeightUnit) -> CreateWeightEntryRequest {
        CreateWeightEntryRequest {
            animal_id: 5,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            weight,
            weight_unit: unit,
            recorded_by: "alice".to_string(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_weight_entry_handler() {
        let (state, _dir) = setup_test_state();

        let response = create_weight_entry(State(state), Json(create_request(10.0, WeightUnit::Kg))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreateWeightEntryResponse = body_json(response).await;
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_create_weight_entry_validation_error() {
        let (state, _dir) = setup_test_state();

        let response = create_weight_entry(State(state), Json(create_request(-1.0, WeightUnit::Kg))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_returns_canonical_kilograms() {
        let (state, _dir) = setup_test_state();
        create_weight_entry(State(state.clone()), Json(create_request(22.0, WeightUnit::Lb))).await;

        let response = list_weight_entries(State(state), Path(5)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let list: WeightEntryListResponse = body_json(response).await;
        assert_eq!(list.entries.len(), 1);
        assert!((list.entries[0].weight_kg - 9.979).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_update_unknown_entry_is_not_found() {
        let (state, _dir) = setup_test_state();
        let request = UpdateWeightEntryRequest {
            weight_id: 12,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            weight: 3.0,
            weight_unit: WeightUnit::Kg,
            recorded_by: "alice".to_string(),
        };

        let response = update_weight_entry(State(state), Path(12), Json(request)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_rejected() {
        let (state, _dir) = setup_test_state();
        let request = UpdateWeightEntryRequest {
            weight_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            weight: 3.0,
            weight_unit: WeightUnit::Kg,
            recorded_by: "alice".to_string(),
        };

        let response = update_weight_entry(State(state), Path(2), Json(request)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_weight_entries_handler() {
        let (state, _dir) = setup_test_state();
        create_weight_entry(State(state.clone()), Json(create_request(10.0, WeightUnit::Kg))).await;

        let response = delete_weight_entries(
            State(state),
            Json(DeleteWeightEntriesRequest { ids: vec![1, 2] }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let result: shared::DeleteWeightEntriesResponse = body_json(response).await;
        assert_eq!(result.deleted_count, 1);
        assert_eq!(result.not_found_ids, vec![2]);
    }
}
