use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::energy_type::EnergyType;

/// Aggregate figures over every item in a portfolio.
///
/// Always derived from the full item set; never updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total_contracts: u64,

    /// Sum of contract quantities in MWh
    pub total_capacity_mwh: Decimal,

    /// Sum of `quantity × price` over all contracts
    pub total_cost: Decimal,

    /// `total_cost / total_capacity_mwh` to 2 dp, 0 when capacity is 0
    pub weighted_avg_price_per_mwh: Decimal,

    /// One entry per energy type present, first-seen order
    pub breakdown_by_energy_type: Vec<EnergyTypeBreakdown>,
}

/// Per-energy-type subtotal within a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyTypeBreakdown {
    pub energy_type: EnergyType,

    pub count: u64,

    pub total_mwh: Decimal,

    pub total_cost: Decimal,
}

/// An energy type's share of total portfolio capacity (pie chart slice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyMixShare {
    pub energy_type: EnergyType,

    pub total_mwh: Decimal,

    /// Percentage of total capacity, 0..=100
    pub share_pct: Decimal,
}

impl PortfolioMetrics {
    /// Metrics of a portfolio with no items.
    pub fn empty() -> Self {
        Self {
            total_contracts: 0,
            total_capacity_mwh: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            weighted_avg_price_per_mwh: Decimal::ZERO,
            breakdown_by_energy_type: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_contracts == 0
    }

    /// Capacity share of each energy type, in breakdown order.
    pub fn energy_mix(&self) -> Vec<EnergyMixShare> {
        let hundred = Decimal::ONE_HUNDRED;
        self.breakdown_by_energy_type
            .iter()
            .map(|b| EnergyMixShare {
                energy_type: b.energy_type.clone(),
                total_mwh: b.total_mwh,
                share_pct: b
                    .total_mwh
                    .checked_div(self.total_capacity_mwh)
                    .and_then(|fraction| fraction.checked_mul(hundred))
                    .unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    /// Breakdown entry for one energy type, if present.
    pub fn breakdown_for(&self, energy_type: &EnergyType) -> Option<&EnergyTypeBreakdown> {
        self.breakdown_by_energy_type
            .iter()
            .find(|b| &b.energy_type == energy_type)
    }
}

impl Default for PortfolioMetrics {
    fn default() -> Self {
        Self::empty()
    }
}
