use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::energy_type::EnergyType;
use crate::errors::CoreError;

/// Lifecycle state of a contract on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Listed and can be added to a portfolio
    Available,
    /// Held in a portfolio
    Reserved,
    /// Settled, no longer tradable
    Sold,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Available => "Available",
            ContractStatus::Reserved => "Reserved",
            ContractStatus::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(ContractStatus::Available),
            "Reserved" => Ok(ContractStatus::Reserved),
            "Sold" => Ok(ContractStatus::Sold),
            other => Err(format!("unknown contract status '{other}'")),
        }
    }
}

/// An energy supply contract as returned by the listing service.
///
/// Quantity and price travel as decimal strings (`"100.00"`) and are kept as
/// `Decimal` so that sums over many contracts stay exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: u64,

    pub energy_type: EnergyType,

    /// Contracted energy in megawatt-hours
    pub quantity_mwh: Decimal,

    /// Unit price per megawatt-hour
    pub price_per_mwh: Decimal,

    pub delivery_start: NaiveDate,

    pub delivery_end: NaiveDate,

    pub location: String,

    pub status: ContractStatus,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// `quantity × price`, computed on demand.
    ///
    /// Fails with `Overflow` when the product leaves the `Decimal` range.
    pub fn total_cost(&self) -> Result<Decimal, CoreError> {
        self.quantity_mwh
            .checked_mul(self.price_per_mwh)
            .ok_or_else(|| {
                CoreError::Overflow(format!(
                    "contract {}: {} MWh × {} per MWh",
                    self.id, self.quantity_mwh, self.price_per_mwh
                ))
            })
    }

    pub fn is_available(&self) -> bool {
        self.status == ContractStatus::Available
    }

    /// Number of delivery days, both ends inclusive. Zero if the window is inverted.
    pub fn delivery_days(&self) -> i64 {
        let days = (self.delivery_end - self.delivery_start).num_days();
        if days < 0 {
            0
        } else {
            days + 1
        }
    }
}

/// One page of the contract listing plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractListResponse {
    pub items: Vec<Contract>,

    /// Number of contracts matching the filters, across all pages
    pub total: u64,

    pub limit: u64,

    pub offset: u64,
}

/// Serde adapter for server timestamps.
///
/// The backend emits naive UTC datetimes (`2026-01-15T10:30:00.123456`) but
/// RFC 3339 with an offset is accepted too. Always serialized as RFC 3339.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}
