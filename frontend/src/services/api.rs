use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::api::{ApiResult, FleetApi};
use shared::envelope::decode_response;
use shared::forms::{SubmitMethod, Submission};
use shared::query::AnalysisFilters;
use shared::{
    AnalysisResponse, AnalysisResult, Dashboard, DashboardResponse, ExpenseList, FilterOptions,
    FilterOptionsResponse, MutationAck, PerDiem, PerDiemList, RecordId, RequestFailure, Resource,
};

use crate::config::AppConfig;
use crate::services::logging::Logger;

const COMPONENT: &str = "api-client";

/// API client for communicating with the fleet backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a built request and decode the envelope
    async fn send<T: DeserializeOwned>(&self, label: &str, request: Request) -> ApiResult<T> {
        Logger::debug_with_component(COMPONENT, &format!("{} {}", label, request.url()));

        let response = request.send().await.map_err(|e| {
            Logger::error_with_component(COMPONENT, &format!("{} failed: {}", label, e));
            RequestFailure::Transport(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        decode_response(status, &body).map_err(|failure| {
            Logger::warn_with_component(
                COMPONENT,
                &format!("{} rejected ({}): {}", label, failure.kind(), failure),
            );
            failure
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = build(Request::get(&self.url(path)))?;
        self.send(&format!("GET {}", path), request).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build(builder: RequestBuilder) -> ApiResult<Request> {
    builder
        .build()
        .map_err(|e| RequestFailure::Transport(format!("Falha ao montar requisição: {}", e)))
}

#[async_trait(?Send)]
impl FleetApi for ApiClient {
    async fn dashboard(&self) -> ApiResult<Dashboard> {
        let response: DashboardResponse = self.get("/dashboard").await?;
        Ok(response.dashboard)
    }

    async fn list_expenses(&self) -> ApiResult<ExpenseList> {
        self.get(Resource::Expenses.path()).await
    }

    async fn list_per_diems(&self) -> ApiResult<Vec<PerDiem>> {
        let response: PerDiemList = self.get(Resource::PerDiems.path()).await?;
        Ok(response.per_diems)
    }

    async fn analysis(&self, filters: &AnalysisFilters) -> ApiResult<AnalysisResult> {
        let response: AnalysisResponse = self.get(&filters.analysis_path()).await?;
        Ok(response.analise)
    }

    async fn filter_options(&self) -> ApiResult<FilterOptions> {
        let response: FilterOptionsResponse = self.get("/filtros").await?;
        Ok(response.filtros)
    }

    async fn submit(&self, submission: &Submission) -> ApiResult<MutationAck> {
        let url = self.url(&submission.path());
        let builder = match submission.method() {
            SubmitMethod::Post => Request::post(&url),
            SubmitMethod::Put => Request::put(&url),
        };
        let request = builder
            .json(&submission.payload)
            .map_err(|e| RequestFailure::Transport(format!("Falha ao serializar formulário: {}", e)))?;
        let label = format!("{} {}", submission.method().as_str(), submission.path());
        self.send(&label, request).await
    }

    async fn delete(&self, resource: Resource, id: &RecordId) -> ApiResult<MutationAck> {
        let path = resource.item_path(id);
        let request = build(Request::delete(&self.url(&path)))?;
        self.send(&format!("DELETE {}", path), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::with_base_url("http://localhost:5000/api/".to_string());
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/gastos"), "http://localhost:5000/api/gastos");
    }

    #[wasm_bindgen_test]
    fn test_default_uses_config() {
        assert_eq!(ApiClient::default().base_url(), AppConfig::default().api_base_url);
    }
}
