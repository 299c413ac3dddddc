use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::contract::{Contract, ContractListResponse};
use crate::models::market::{EnergyTypeCount, MarketStats};
use crate::services::metrics_service::checked_add;

/// Derives marketplace statistics from one fetched listing page.
///
/// Pure reducer: the caller decides how large a sample to fetch. Apart from
/// `available_contracts`, results describe the sample only.
pub struct MarketStatsService;

impl MarketStatsService {
    pub fn new() -> Self {
        Self
    }

    /// Statistics over `page.items`, with the market size taken from `page.total`.
    pub fn compute(&self, page: &ContractListResponse) -> Result<MarketStats, CoreError> {
        self.compute_sample(&page.items, page.total)
    }

    /// Statistics over `sample`, reporting `total_available` as the market size.
    ///
    /// Fails with `CoreError::Overflow` when a sum leaves the `Decimal` range.
    pub fn compute_sample(
        &self,
        sample: &[Contract],
        total_available: u64,
    ) -> Result<MarketStats, CoreError> {
        let mut total_capacity = Decimal::ZERO;
        let mut total_value = Decimal::ZERO;
        let mut by_energy_type: Vec<EnergyTypeCount> = Vec::new();
        let mut locations: Vec<String> = Vec::new();

        for contract in sample {
            total_capacity = checked_add(total_capacity, contract.quantity_mwh, "total_capacity")?;
            total_value = checked_add(total_value, contract.total_cost()?, "market value")?;

            match by_energy_type
                .iter_mut()
                .find(|c| c.energy_type == contract.energy_type)
            {
                Some(entry) => entry.count += 1,
                None => by_energy_type.push(EnergyTypeCount {
                    energy_type: contract.energy_type.clone(),
                    count: 1,
                }),
            }

            if !locations.contains(&contract.location) {
                locations.push(contract.location.clone());
            }
        }

        let avg_market_price = if total_capacity > Decimal::ZERO {
            total_value
                .checked_div(total_capacity)
                .ok_or_else(|| CoreError::Overflow("avg_market_price exceeds the decimal range".into()))?
        } else {
            Decimal::ZERO
        };

        log::debug!(
            "market stats over {} of {} contracts: {} MWh, avg {}",
            sample.len(),
            total_available,
            total_capacity,
            avg_market_price
        );

        Ok(MarketStats {
            available_contracts: total_available,
            sample_size: sample.len() as u64,
            total_capacity,
            avg_market_price,
            by_energy_type,
            locations,
        })
    }
}

impl Default for MarketStatsService {
    fn default() -> Self {
        Self::new()
    }
}
