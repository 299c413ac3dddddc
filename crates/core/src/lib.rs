pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;

use futures::channel::mpsc::UnboundedReceiver;
use futures::future::try_join;
use serde::{Deserialize, Serialize};

use errors::CoreError;
use models::{
    contract::{Contract, ContractListResponse},
    energy_type::EnergyType,
    filters::ContractFilters,
    market::MarketStats,
    notification::Notification,
    pagination::PageInfo,
    portfolio::{AddOutcome, AddedContracts, PortfolioItem, PortfolioView, RemoveOutcome},
    settings::Settings,
};
use providers::http::HttpMarketplaceClient;
use providers::traits::MarketplaceApi;
use services::{
    market_service::MarketStatsService, notification_service::Notifier,
    pagination_service::PaginationService, portfolio_service::PortfolioService,
};

/// Everything the dashboard shows, fetched in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub portfolio: PortfolioView,

    pub market: MarketStats,

    /// Most recently listed portfolio items, newest first
    pub recent_items: Vec<PortfolioItem>,
}

/// Main entry point for the Energy Marketplace core library.
/// Holds the listing state and all services needed to operate on it.
#[must_use]
pub struct EnergyMarketplace {
    api: Box<dyn MarketplaceApi>,
    settings: Settings,
    filters: ContractFilters,
    /// Last successfully fetched listing page.
    page: Option<ContractListResponse>,
    added: AddedContracts,
    notifier: Notifier,
    portfolio_service: PortfolioService,
    market_service: MarketStatsService,
    pagination_service: PaginationService,
}

impl std::fmt::Debug for EnergyMarketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnergyMarketplace")
            .field("api", &self.api.name())
            .field("filters", &self.filters)
            .field("page_items", &self.page.as_ref().map(|p| p.items.len()))
            .field("added", &self.added.len())
            .finish()
    }
}

impl EnergyMarketplace {
    /// Create a marketplace backed by any `MarketplaceApi` implementation.
    pub fn new(api: Box<dyn MarketplaceApi>, settings: Settings) -> Self {
        let filters = Self::default_filters(&settings);
        Self {
            api,
            settings,
            filters,
            page: None,
            added: AddedContracts::new(),
            notifier: Notifier::new(),
            portfolio_service: PortfolioService::new(),
            market_service: MarketStatsService::new(),
            pagination_service: PaginationService::new(),
        }
    }

    /// Create a marketplace talking HTTP to `settings.api_base_url`.
    pub fn connect(settings: Settings) -> Result<Self, CoreError> {
        let client = HttpMarketplaceClient::new(&settings)?;
        Ok(Self::new(Box::new(client), settings))
    }

    /// Same as `connect`, with settings read from the environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::connect(Settings::from_env()?)
    }

    fn default_filters(settings: &Settings) -> ContractFilters {
        ContractFilters {
            limit: Some(settings.page_size),
            ..ContractFilters::available()
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Receive every notification published from now on.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Notification> {
        self.notifier.subscribe()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifier.publish(notification);
    }

    // ── Filters ─────────────────────────────────────────────────────

    #[must_use]
    pub fn filters(&self) -> &ContractFilters {
        &self.filters
    }

    /// Replace the filters. The offset goes back to the first page and a
    /// missing limit falls back to the configured page size.
    pub fn set_filters(&mut self, filters: ContractFilters) {
        self.filters = ContractFilters {
            offset: None,
            limit: filters.limit.or(Some(self.settings.page_size)),
            ..filters
        };
    }

    /// Back to the default view: Available contracts, first page.
    pub fn clear_filters(&mut self) {
        self.filters = Self::default_filters(&self.settings);
    }

    /// Change the sort order, keeping the other filters.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: impl Into<String>) {
        let filters = self.filters.clone().with_sort(field, direction);
        self.set_filters(filters);
    }

    // ── Listing ─────────────────────────────────────────────────────

    /// Fetch the listing page for the current filters.
    pub async fn fetch_contracts(&mut self) -> Result<&ContractListResponse, CoreError> {
        let page = self.api.list_contracts(&self.filters).await?;
        log::debug!(
            "fetched {} of {} contracts at offset {}",
            page.items.len(),
            page.total,
            page.offset
        );
        Ok(&*self.page.insert(page))
    }

    /// The last fetched listing page, if any.
    #[must_use]
    pub fn current_page(&self) -> Option<&ContractListResponse> {
        self.page.as_ref()
    }

    /// Navigation state of the last fetched page.
    pub fn page_info(&self) -> Result<Option<PageInfo>, CoreError> {
        self.page
            .as_ref()
            .map(|p| self.pagination_service.for_response(p))
            .transpose()
    }

    /// Move to the next page and fetch it. `Ok(None)` on the last page.
    pub async fn next_page(&mut self) -> Result<Option<&ContractListResponse>, CoreError> {
        match self.page_info()? {
            Some(info) if info.has_next => {
                self.filters.offset = Some(info.next_offset);
                self.fetch_contracts().await.map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Move to the previous page and fetch it. `Ok(None)` on the first page.
    pub async fn previous_page(&mut self) -> Result<Option<&ContractListResponse>, CoreError> {
        match self.page_info()? {
            Some(info) if info.has_previous => {
                self.filters.offset = Some(info.previous_offset);
                self.fetch_contracts().await.map(Some)
            }
            _ => Ok(None),
        }
    }

    pub async fn get_contract(&self, contract_id: u64) -> Result<Contract, CoreError> {
        self.api.get_contract(contract_id).await
    }

    /// Whether a contract was added during this session (UI highlight).
    #[must_use]
    pub fn is_added(&self, contract_id: u64) -> bool {
        self.added.contains(contract_id)
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Add a listed contract to the portfolio, then re-fetch the listing.
    ///
    /// A contract already added is reported as `AlreadyAdded` without any
    /// request. A failed add is published as an error notification and
    /// returned. Once the service accepted the add the outcome is `Ok`, even
    /// if the listing refresh fails; that failure is published as an error
    /// notification and the previous page stays current.
    pub async fn add_to_portfolio(&mut self, contract: &Contract) -> Result<AddOutcome, CoreError> {
        let result = self
            .portfolio_service
            .add(self.api.as_ref(), &mut self.added, contract)
            .await;

        match result {
            Ok(outcome @ AddOutcome::AlreadyAdded { .. }) => {
                self.notify(Notification::info("Contract already added to portfolio"));
                Ok(outcome)
            }
            Ok(outcome @ AddOutcome::Added { .. }) => {
                self.notify(Notification::success(format!(
                    "Added {} contract to portfolio",
                    contract.energy_type
                )));
                let refreshed = self.fetch_contracts().await.map(|_| ());
                if let Err(e) = refreshed {
                    log::warn!("listing refresh after adding contract {} failed: {e}", contract.id);
                    self.notify(Notification::error(format!(
                        "Could not refresh contracts: {e}"
                    )));
                }
                Ok(outcome)
            }
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Remove a contract from the portfolio, then re-fetch the portfolio.
    ///
    /// A contract the service no longer holds is reported as
    /// `AlreadyRemoved` and the portfolio is still refreshed. The refreshed
    /// view is `None` when that re-fetch fails; the outcome stands and the
    /// failure is published as an error notification.
    pub async fn remove_from_portfolio(
        &mut self,
        contract_id: u64,
        energy_type: &EnergyType,
    ) -> Result<(RemoveOutcome, Option<PortfolioView>), CoreError> {
        let result = self
            .portfolio_service
            .remove(self.api.as_ref(), &mut self.added, contract_id)
            .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                return Err(e);
            }
        };

        match outcome {
            RemoveOutcome::Removed { .. } => self.notify(Notification::success(format!(
                "Removed {energy_type} contract from portfolio"
            ))),
            RemoveOutcome::AlreadyRemoved { .. } => {
                self.notify(Notification::info("Contract already removed"))
            }
        }

        let view = match self.fetch_portfolio().await {
            Ok(view) => Some(view),
            Err(e) => {
                log::warn!("portfolio refresh after removing contract {contract_id} failed: {e}");
                self.notify(Notification::error(format!(
                    "Could not refresh portfolio: {e}"
                )));
                None
            }
        };
        Ok((outcome, view))
    }

    /// Fetch the portfolio with locally computed metrics.
    pub async fn fetch_portfolio(&mut self) -> Result<PortfolioView, CoreError> {
        self.portfolio_service
            .fetch(self.api.as_ref(), &mut self.added)
            .await
    }

    // ── Market & Dashboard ──────────────────────────────────────────

    fn market_sample_filters(&self) -> ContractFilters {
        ContractFilters {
            limit: Some(self.settings.market_sample_size),
            ..ContractFilters::available()
        }
    }

    /// Statistics over a sample of Available contracts
    /// (`settings.market_sample_size` of them at most).
    pub async fn fetch_market_stats(&self) -> Result<MarketStats, CoreError> {
        let page = self.api.list_contracts(&self.market_sample_filters()).await?;
        self.market_service.compute(&page)
    }

    /// Portfolio and market statistics, fetched concurrently.
    pub async fn fetch_dashboard(&mut self) -> Result<Dashboard, CoreError> {
        let sample_filters = self.market_sample_filters();
        let api = self.api.as_ref();
        let (portfolio, sample) =
            try_join(api.get_portfolio(), api.list_contracts(&sample_filters)).await?;

        let market = self.market_service.compute(&sample)?;
        let view = self.portfolio_service.build_view(portfolio, &mut self.added)?;
        let recent_items = view
            .recent_items(self.settings.recent_items)
            .into_iter()
            .cloned()
            .collect();

        Ok(Dashboard {
            portfolio: view,
            market,
            recent_items,
        })
    }
}
