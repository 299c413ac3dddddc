use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::contract::{Contract, ContractListResponse};
use crate::models::filters::ContractFilters;
use crate::models::portfolio::PortfolioResponse;
use crate::models::settings::Settings;
use crate::services::query_service::QueryService;
use super::traits::MarketplaceApi;

/// JSON-over-HTTP client for the marketplace API.
///
/// - **Listing**: `GET /contracts?{query}`, `GET /contracts/{id}`
/// - **Portfolio**: `GET /portfolio`, `POST /portfolio/items`,
///   `DELETE /portfolio/items/{contract_id}`
///
/// Failed responses carry `{"detail": "..."}`; the status code decides the
/// `CoreError` variant (see `error_from_response`).
pub struct HttpMarketplaceClient {
    client: Client,
    base_url: String,
    query_service: QueryService,
}

impl HttpMarketplaceClient {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            query_service: QueryService::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full listing URL for `filters`. No `?` when no filter is set.
    pub fn contracts_url(&self, filters: &ContractFilters) -> Result<String, CoreError> {
        let query = self.query_service.build(filters)?.to_query_string();
        if query.is_empty() {
            Ok(format!("{}/contracts", self.base_url))
        } else {
            Ok(format!("{}/contracts?{query}", self.base_url))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CoreError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(error_from_response(status.as_u16(), &body));
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), CoreError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(error_from_response(status.as_u16(), &body));
        }
        Ok(())
    }
}

// ── API payload types ───────────────────────────────────────────────

#[derive(Serialize)]
struct AddItemRequest {
    contract_id: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Map a non-2xx response to a `CoreError`.
///
/// 404 → `NotFound`, 409 → `Conflict`, anything else → `Remote`. The
/// `detail` field is passed through; validation errors (a JSON array) are
/// kept as compact JSON. Without a usable detail the message is `HTTP {status}`.
pub fn error_from_response(status: u16, body: &str) -> CoreError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::String(_) | serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    match status {
        404 => CoreError::NotFound(detail),
        409 => CoreError::Conflict(detail),
        _ => CoreError::Remote { status, detail },
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketplaceApi for HttpMarketplaceClient {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn list_contracts(
        &self,
        filters: &ContractFilters,
    ) -> Result<ContractListResponse, CoreError> {
        let url = self.contracts_url(filters)?;
        log::debug!("GET {url}");
        self.send_json(self.client.get(&url)).await
    }

    async fn get_contract(&self, contract_id: u64) -> Result<Contract, CoreError> {
        let url = format!("{}/contracts/{contract_id}", self.base_url);
        log::debug!("GET {url}");
        self.send_json(self.client.get(&url)).await
    }

    async fn get_portfolio(&self) -> Result<PortfolioResponse, CoreError> {
        let url = format!("{}/portfolio", self.base_url);
        log::debug!("GET {url}");
        self.send_json(self.client.get(&url)).await
    }

    async fn add_portfolio_item(&self, contract_id: u64) -> Result<(), CoreError> {
        let url = format!("{}/portfolio/items", self.base_url);
        log::debug!("POST {url} contract_id={contract_id}");
        self.send_empty(self.client.post(&url).json(&AddItemRequest { contract_id }))
            .await
    }

    async fn remove_portfolio_item(&self, contract_id: u64) -> Result<(), CoreError> {
        let url = format!("{}/portfolio/items/{contract_id}", self.base_url);
        log::debug!("DELETE {url}");
        self.send_empty(self.client.delete(&url)).await
    }
}
