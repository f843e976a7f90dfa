//! # Weight Log Backend
//!
//! Server half of the animal weight log. The browser view posts weights in
//! whatever unit the user entered; this crate derives canonical kilograms and
//! keeps the log on disk.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (WeightLogService, canonicalization)
//!     ↓
//! Storage Layer (CSV repository)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::WeightLogService;
use crate::storage::CsvConnection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub weight_log_service: WeightLogService<CsvConnection>,
}

/// Initialize storage and services from configuration
pub fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_directory.display());
    let connection = Arc::new(CsvConnection::new(&config.data_directory)?);

    info!("Setting up domain model");
    let weight_log_service = WeightLogService::new(connection);

    Ok(AppState { weight_log_service })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/animals/:animal_id/weight_log", get(io::list_weight_entries))
        .route(
            "/animal_weight_log",
            post(io::create_weight_entry).delete(io::delete_weight_entries),
        )
        .route("/animal_weight_log/:weight_id", put(io::update_weight_entry));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_router() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            data_directory: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let state = initialize_backend(&config).unwrap();
        (create_router(state, &config.cors_origin).unwrap(), dir)
    }

    #[tokio::test]
    async fn test_router_serves_create_and_list() {
        let (router, _dir) = test_router();

        let create = Request::builder()
            .method("POST")
            .uri("/api/animal_weight_log")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"animal_id":3,"date":"2024-01-01","weight":22.0,"weight_unit":"lb","recorded_by":"alice"}"#,
            ))
            .unwrap();
        let response = router.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let list = Request::builder()
            .uri("/api/animals/3/weight_log")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(list).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_rejects_unknown_unit() {
        let (router, _dir) = test_router();

        let create = Request::builder()
            .method("POST")
            .uri("/api/animal_weight_log")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"animal_id":3,"date":"2024-01-01","weight":2.0,"weight_unit":"stone","recorded_by":"alice"}"#,
            ))
            .unwrap();
        let response = router.oneshot(create).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[test]
    fn test_invalid_cors_origin_is_error() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            data_directory: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let state = initialize_backend(&config).unwrap();
        assert!(create_router(state, "bad\norigin").is_err());
    }
}
