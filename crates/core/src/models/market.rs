use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::energy_type::EnergyType;

/// Summary of the marketplace derived from one fetched page of Available
/// contracts.
///
/// Only `available_contracts` describes the full market. Every other field is
/// sample-scoped: computed over the `sample_size` contracts actually fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Total matching contracts reported by the listing envelope
    pub available_contracts: u64,

    /// Number of contracts the statistics were computed from
    pub sample_size: u64,

    /// Sum of quantities in the sample, MWh
    pub total_capacity: Decimal,

    /// Capacity-weighted average price over the sample, 0 when capacity is 0
    pub avg_market_price: Decimal,

    /// Contract count per energy type, first-seen order
    pub by_energy_type: Vec<EnergyTypeCount>,

    /// Distinct locations, first-seen order
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyTypeCount {
    pub energy_type: EnergyType,
    pub count: u64,
}

impl MarketStats {
    /// True when the sample covers every matching contract.
    pub fn is_exact(&self) -> bool {
        self.sample_size >= self.available_contracts
    }
}
