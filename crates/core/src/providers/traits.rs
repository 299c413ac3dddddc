use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::contract::{Contract, ContractListResponse};
use crate::models::filters::ContractFilters;
use crate::models::portfolio::PortfolioResponse;

/// Remote side of the marketplace: contract listing and portfolio storage.
///
/// The HTTP client implements this; tests and alternative backends plug in
/// their own implementation without touching the aggregation code.
///
/// Implementations map a missing target to `CoreError::NotFound` and a
/// refused mutation to `CoreError::Conflict`, so callers never need to
/// inspect message text.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketplaceApi: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// One page of contracts matching `filters`, plus the full match count.
    async fn list_contracts(
        &self,
        filters: &ContractFilters,
    ) -> Result<ContractListResponse, CoreError>;

    /// A single contract by id.
    async fn get_contract(&self, contract_id: u64) -> Result<Contract, CoreError>;

    /// All portfolio items with the service's metrics.
    async fn get_portfolio(&self) -> Result<PortfolioResponse, CoreError>;

    /// Add a contract to the portfolio.
    async fn add_portfolio_item(&self, contract_id: u64) -> Result<(), CoreError>;

    /// Remove a contract from the portfolio.
    async fn remove_portfolio_item(&self, contract_id: u64) -> Result<(), CoreError>;
}
