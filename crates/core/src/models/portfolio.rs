use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::contract::{timestamp, Contract};
use super::metrics::PortfolioMetrics;

/// A contract held in the user's portfolio.
///
/// `contract` is the contract as it looked when the portfolio was fetched,
/// not necessarily when it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: u64,

    pub contract_id: u64,

    #[serde(with = "timestamp")]
    pub added_at: DateTime<Utc>,

    pub contract: Contract,
}

/// Body of `GET /portfolio`: the items plus the server's own metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub items: Vec<PortfolioItem>,

    pub metrics: PortfolioMetrics,
}

/// Portfolio as presented to the UI layer.
///
/// `metrics` are always recomputed locally from `items`; `server_metrics` is
/// what the service reported, kept for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioView {
    pub items: Vec<PortfolioItem>,

    pub metrics: PortfolioMetrics,

    pub server_metrics: PortfolioMetrics,
}

impl PortfolioView {
    /// The `count` most recently listed items, newest first.
    pub fn recent_items(&self, count: usize) -> Vec<&PortfolioItem> {
        self.items.iter().rev().take(count).collect()
    }

    /// Whether a contract is currently held.
    pub fn contains(&self, contract_id: u64) -> bool {
        self.items.iter().any(|i| i.contract_id == contract_id)
    }
}

/// Contract ids the user added during this session, kept only for UI
/// feedback and the local duplicate-add guard.
///
/// Rebuilt from the authoritative portfolio on every successful re-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddedContracts {
    ids: HashSet<u64>,
}

impl AddedContracts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, contract_id: u64) -> bool {
        self.ids.contains(&contract_id)
    }

    /// Record an add. Returns false if the id was already marked.
    pub fn mark(&mut self, contract_id: u64) -> bool {
        self.ids.insert(contract_id)
    }

    pub fn unmark(&mut self, contract_id: u64) {
        self.ids.remove(&contract_id);
    }

    /// Replace the markers with the contents of a freshly fetched portfolio.
    pub fn reset_from(&mut self, items: &[PortfolioItem]) {
        self.ids = items.iter().map(|i| i.contract_id).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Result of an add-to-portfolio request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The service accepted the contract
    Added { contract_id: u64 },
    /// Already marked locally; no request was sent
    AlreadyAdded { contract_id: u64 },
}

/// Result of a remove-from-portfolio request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed { contract_id: u64 },
    /// The service no longer had it (double remove, stale view)
    AlreadyRemoved { contract_id: u64 },
}
