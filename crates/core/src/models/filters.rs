use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::contract::ContractStatus;
use super::energy_type::EnergyType;

/// Sort field used when `sort_by` is absent.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Sort direction used when `sort_dir` is absent.
pub const DEFAULT_SORT_DIR: &str = "asc";

/// Sort fields the listing service is guaranteed to honour.
pub const SORT_FIELDS: [&str; 4] = ["id", "price_per_mwh", "quantity_mwh", "delivery_start"];

/// A named sort preset offered by the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub label: &'static str,
    pub field: &'static str,
    pub direction: &'static str,
}

impl SortOption {
    /// Combined `field-direction` key, e.g. `price_per_mwh-desc`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.field, self.direction)
    }
}

/// Sort presets, in display order.
pub const SORT_OPTIONS: [SortOption; 7] = [
    SortOption { label: "Default", field: "id", direction: "asc" },
    SortOption { label: "Price: Low to High", field: "price_per_mwh", direction: "asc" },
    SortOption { label: "Price: High to Low", field: "price_per_mwh", direction: "desc" },
    SortOption { label: "Quantity: High to Low", field: "quantity_mwh", direction: "desc" },
    SortOption { label: "Quantity: Low to High", field: "quantity_mwh", direction: "asc" },
    SortOption { label: "Delivery: Earliest", field: "delivery_start", direction: "asc" },
    SortOption { label: "Delivery: Latest", field: "delivery_start", direction: "desc" },
];

/// Query constraints for the contract listing.
///
/// Every field is optional and absence means "unconstrained". Ranges are
/// inclusive and forwarded as given: `min <= max` is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractFilters {
    /// Any of these energy types (OR). Empty means all types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub energy_type: Vec<EnergyType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Delivery must start on or after this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_start_min: Option<NaiveDate>,

    /// Delivery must end on or before this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_end_max: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,
}

impl ContractFilters {
    /// The listing view's starting point: only Available contracts.
    pub fn available() -> Self {
        Self {
            status: Some(ContractStatus::Available),
            ..Self::default()
        }
    }

    /// Toggle an energy type in or out of the OR-set.
    pub fn toggle_energy_type(&mut self, energy_type: EnergyType) {
        if let Some(pos) = self.energy_type.iter().position(|t| *t == energy_type) {
            self.energy_type.remove(pos);
        } else {
            self.energy_type.push(energy_type);
        }
    }

    /// Apply a sort preset (or any field/direction pair).
    pub fn with_sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self.sort_dir = Some(direction.into());
        self
    }

    /// Effective sort field, `id` when none was chosen.
    pub fn sort_field(&self) -> &str {
        self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD)
    }

    /// Effective sort direction, `asc` when none was chosen.
    pub fn sort_direction(&self) -> &str {
        self.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIR)
    }

    /// Combined `field-direction` key matching `SortOption::key`.
    pub fn sort_key(&self) -> String {
        format!("{}-{}", self.sort_field(), self.sort_direction())
    }

    /// Caller-supplied offset, 0 when absent.
    pub fn effective_offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}
