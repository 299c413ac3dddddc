use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::CoreError;
use crate::models::metrics::{EnergyTypeBreakdown, PortfolioMetrics};
use crate::models::portfolio::PortfolioItem;

/// Decimal places of the reported weighted-average price.
const PRICE_DP: u32 = 2;

/// A field where the service's metrics disagree with the local computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsDiscrepancy {
    pub field: String,
    pub server: String,
    pub computed: String,
}

/// Computes portfolio metrics from the full item set.
///
/// Pure business logic, no I/O. Sums are exact decimals, so the breakdown
/// subtotals add up to the portfolio totals without tolerance.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Totals, weighted-average price and per-energy-type breakdown.
    ///
    /// The weighted average is `total_cost / total_capacity` (so a large
    /// contract counts more than a small one), rounded half-to-even to 2 dp,
    /// and 0 for a zero-capacity portfolio. Values beyond the `Decimal` range
    /// fail with `CoreError::Overflow`.
    pub fn compute(&self, items: &[PortfolioItem]) -> Result<PortfolioMetrics, CoreError> {
        if items.is_empty() {
            return Ok(PortfolioMetrics::empty());
        }

        let mut total_capacity = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        let mut breakdown: Vec<EnergyTypeBreakdown> = Vec::new();

        for item in items {
            let contract = &item.contract;
            let qty = contract.quantity_mwh;
            let cost = contract.total_cost()?;
            total_capacity = checked_add(total_capacity, qty, "total_capacity_mwh")?;
            total_cost = checked_add(total_cost, cost, "total_cost")?;

            match breakdown
                .iter_mut()
                .find(|b| b.energy_type == contract.energy_type)
            {
                Some(entry) => {
                    entry.count += 1;
                    entry.total_mwh = checked_add(entry.total_mwh, qty, "breakdown total_mwh")?;
                    entry.total_cost = checked_add(entry.total_cost, cost, "breakdown total_cost")?;
                }
                None => breakdown.push(EnergyTypeBreakdown {
                    energy_type: contract.energy_type.clone(),
                    count: 1,
                    total_mwh: qty,
                    total_cost: cost,
                }),
            }
        }

        let weighted_avg = if total_capacity > Decimal::ZERO {
            total_cost
                .checked_div(total_capacity)
                .ok_or_else(|| CoreError::Overflow("weighted_avg_price_per_mwh exceeds the decimal range".into()))?
                .round_dp_with_strategy(PRICE_DP, RoundingStrategy::MidpointNearestEven)
        } else {
            Decimal::ZERO
        };

        log::debug!(
            "recomputed metrics for {} items: {} MWh, cost {}, avg {}",
            items.len(),
            total_capacity,
            total_cost,
            weighted_avg
        );

        Ok(PortfolioMetrics {
            total_contracts: items.len() as u64,
            total_capacity_mwh: total_capacity,
            total_cost,
            weighted_avg_price_per_mwh: weighted_avg,
            breakdown_by_energy_type: breakdown,
        })
    }

    /// Compare service-reported metrics against locally computed ones.
    ///
    /// Breakdown entries are matched by energy type; their order is not
    /// compared. Returns an empty list when both agree.
    pub fn reconcile(
        &self,
        server: &PortfolioMetrics,
        computed: &PortfolioMetrics,
    ) -> Vec<MetricsDiscrepancy> {
        let mut diffs = Vec::new();

        check(&mut diffs, "total_contracts", &server.total_contracts, &computed.total_contracts);
        check(&mut diffs, "total_capacity_mwh", &server.total_capacity_mwh, &computed.total_capacity_mwh);
        check(&mut diffs, "total_cost", &server.total_cost, &computed.total_cost);
        check(
            &mut diffs,
            "weighted_avg_price_per_mwh",
            &server.weighted_avg_price_per_mwh,
            &computed.weighted_avg_price_per_mwh,
        );

        for entry in &computed.breakdown_by_energy_type {
            let field = format!("breakdown[{}]", entry.energy_type);
            match server.breakdown_for(&entry.energy_type) {
                Some(theirs) => {
                    check(&mut diffs, &format!("{field}.count"), &theirs.count, &entry.count);
                    check(&mut diffs, &format!("{field}.total_mwh"), &theirs.total_mwh, &entry.total_mwh);
                    check(&mut diffs, &format!("{field}.total_cost"), &theirs.total_cost, &entry.total_cost);
                }
                None => diffs.push(MetricsDiscrepancy {
                    field,
                    server: "missing".into(),
                    computed: format!("{} contracts", entry.count),
                }),
            }
        }
        for entry in &server.breakdown_by_energy_type {
            if computed.breakdown_for(&entry.energy_type).is_none() {
                diffs.push(MetricsDiscrepancy {
                    field: format!("breakdown[{}]", entry.energy_type),
                    server: format!("{} contracts", entry.count),
                    computed: "missing".into(),
                });
            }
        }

        diffs
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

fn check<T: PartialEq + std::fmt::Display>(
    diffs: &mut Vec<MetricsDiscrepancy>,
    field: &str,
    server: &T,
    computed: &T,
) {
    if server != computed {
        diffs.push(MetricsDiscrepancy {
            field: field.to_string(),
            server: server.to_string(),
            computed: computed.to_string(),
        });
    }
}

/// `total + value`, or `Overflow` naming the running sum that left the range.
pub(crate) fn checked_add(total: Decimal, value: Decimal, field: &str) -> Result<Decimal, CoreError> {
    total
        .checked_add(value)
        .ok_or_else(|| CoreError::Overflow(format!("{field} exceeds the decimal range")))
}
