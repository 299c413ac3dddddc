use crate::errors::CoreError;
use crate::models::contract::Contract;
use crate::models::portfolio::{
    AddOutcome, AddedContracts, PortfolioResponse, PortfolioView, RemoveOutcome,
};
use crate::providers::traits::MarketplaceApi;
use crate::services::metrics_service::MetricsService;

/// Portfolio mutations and fetches against a `MarketplaceApi`.
///
/// Owns no state: the caller passes its `AddedContracts` so the duplicate
/// guard and UI markers live in one explicit place.
pub struct PortfolioService {
    metrics_service: MetricsService,
}

impl PortfolioService {
    pub fn new() -> Self {
        Self {
            metrics_service: MetricsService::new(),
        }
    }

    /// Add `contract` to the portfolio.
    ///
    /// A contract already marked in `added` is reported as `AlreadyAdded`
    /// without contacting the service.
    pub async fn add(
        &self,
        api: &dyn MarketplaceApi,
        added: &mut AddedContracts,
        contract: &Contract,
    ) -> Result<AddOutcome, CoreError> {
        if added.contains(contract.id) {
            log::warn!("contract {} already added, skipping request", contract.id);
            return Ok(AddOutcome::AlreadyAdded {
                contract_id: contract.id,
            });
        }

        api.add_portfolio_item(contract.id).await?;
        added.mark(contract.id);
        log::info!("added {} contract {} to portfolio", contract.energy_type, contract.id);
        Ok(AddOutcome::Added {
            contract_id: contract.id,
        })
    }

    /// Remove a contract from the portfolio.
    ///
    /// `NotFound` from the service means someone got there first; it is
    /// reported as `AlreadyRemoved` rather than an error.
    pub async fn remove(
        &self,
        api: &dyn MarketplaceApi,
        added: &mut AddedContracts,
        contract_id: u64,
    ) -> Result<RemoveOutcome, CoreError> {
        let outcome = match api.remove_portfolio_item(contract_id).await {
            Ok(()) => {
                log::info!("removed contract {contract_id} from portfolio");
                RemoveOutcome::Removed { contract_id }
            }
            Err(CoreError::NotFound(detail)) => {
                log::warn!("contract {contract_id} already removed: {detail}");
                RemoveOutcome::AlreadyRemoved { contract_id }
            }
            Err(e) => return Err(e),
        };
        added.unmark(contract_id);
        Ok(outcome)
    }

    /// Fetch the portfolio and recompute its metrics locally.
    pub async fn fetch(
        &self,
        api: &dyn MarketplaceApi,
        added: &mut AddedContracts,
    ) -> Result<PortfolioView, CoreError> {
        let response = api.get_portfolio().await?;
        self.build_view(response, added)
    }

    /// Turn a fetched portfolio into the view the UI works with.
    ///
    /// The local computation is authoritative; any disagreement with the
    /// service's figures is logged. `added` is rebuilt from the items, unless
    /// the metrics cannot be computed.
    pub fn build_view(
        &self,
        response: PortfolioResponse,
        added: &mut AddedContracts,
    ) -> Result<PortfolioView, CoreError> {
        let metrics = self.metrics_service.compute(&response.items)?;

        for diff in self.metrics_service.reconcile(&response.metrics, &metrics) {
            log::warn!(
                "portfolio metrics mismatch on {}: service {}, computed {}",
                diff.field,
                diff.server,
                diff.computed
            );
        }

        added.reset_from(&response.items);

        Ok(PortfolioView {
            items: response.items,
            metrics,
            server_metrics: response.metrics,
        })
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
