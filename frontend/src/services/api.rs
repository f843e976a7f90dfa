use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    AnimalId, CreateWeightEntryRequest, CreateWeightEntryResponse, DeleteWeightEntriesRequest,
    DeleteWeightEntriesResponse, UpdateWeightEntryRequest, UpdateWeightEntryResponse, WeightEntry,
    WeightEntryId, WeightEntryListResponse,
};
use tracing::debug;

use crate::error::RemoteError;
use crate::ports::RemoteStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API client for the weight log backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url("http://localhost:3000")
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Per-request timeout. Expiry is reported as a network error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RemoteError> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(RemoteError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RemoteStore for ApiClient {
    async fn create(&self, request: &CreateWeightEntryRequest) -> Result<WeightEntryId, RemoteError> {
        let url = self.url("/animal_weight_log");
        debug!("POST {}", url);

        let created: CreateWeightEntryResponse = self.send(self.client.post(&url).json(request)).await?;
        Ok(created.id)
    }

    async fn update(&self, request: &UpdateWeightEntryRequest) -> Result<(), RemoteError> {
        let url = self.url(&format!("/animal_weight_log/{}", request.weight_id));
        debug!("PUT {}", url);

        let _: UpdateWeightEntryResponse = self.send(self.client.put(&url).json(request)).await?;
        Ok(())
    }

    async fn delete(
        &self,
        request: &DeleteWeightEntriesRequest,
    ) -> Result<DeleteWeightEntriesResponse, RemoteError> {
        let url = self.url("/animal_weight_log");
        debug!("DELETE {} ids={:?}", url, request.ids);

        self.send(self.client.delete(&url).json(request)).await
    }

    async fn list(&self, animal_id: AnimalId) -> Result<Vec<WeightEntry>, RemoteError> {
        let url = self.url(&format!("/animals/{}/weight_log", animal_id));
        debug!("GET {}", url);

        let list: WeightEntryListResponse = self.send(self.client.get(&url)).await?;
        Ok(list.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = ApiClient::with_base_url("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
        assert_eq!(client.url("/animal_weight_log"), "http://localhost:4000/api/animal_weight_log");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let client = ApiClient::with_base_url("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));

        let result = client.list(1).await;

        assert!(matches!(result, Err(RemoteError::Network(_))));
    }
}
