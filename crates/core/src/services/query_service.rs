use chrono::NaiveDate;
use url::form_urlencoded;

use crate::errors::CoreError;
use crate::models::contract::ContractStatus;
use crate::models::energy_type::EnergyType;
use crate::models::filters::ContractFilters;

/// Ordered list of query parameters. Keys may repeat (`energy_type`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Distinct keys, in first-seen order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (k, _) in &self.pairs {
            if !keys.contains(&k.as_str()) {
                keys.push(k);
            }
        }
        keys
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-urlencoded rendering without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Parse a form-urlencoded query string (with or without a leading `?`).
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }
}

/// Translates `ContractFilters` into listing query parameters and back.
///
/// Pure: no I/O, no state.
pub struct QueryService;

impl QueryService {
    pub fn new() -> Self {
        Self
    }

    /// Build the listing query for `filters`.
    ///
    /// Only defined fields are emitted, in a fixed order. Energy types become
    /// one `energy_type` entry each (order and duplicates kept). A missing sort
    /// is left out so the listing service applies its `id`/`asc` default.
    pub fn build(&self, filters: &ContractFilters) -> Result<QueryParams, CoreError> {
        let mut params = QueryParams::new();

        for energy_type in &filters.energy_type {
            params.push("energy_type", energy_type.as_str());
        }

        push_number(&mut params, "price_min", filters.price_min)?;
        push_number(&mut params, "price_max", filters.price_max)?;
        push_number(&mut params, "qty_min", filters.qty_min)?;
        push_number(&mut params, "qty_max", filters.qty_max)?;

        if let Some(location) = filters.location.as_deref().filter(|l| !l.is_empty()) {
            params.push("location", location);
        }
        if let Some(date) = filters.delivery_start_min {
            params.push("delivery_start_min", format_date(date));
        }
        if let Some(date) = filters.delivery_end_max {
            params.push("delivery_end_max", format_date(date));
        }
        if let Some(status) = filters.status {
            params.push("status", status.as_str());
        }
        if let Some(limit) = filters.limit {
            params.push("limit", limit.to_string());
        }
        if let Some(offset) = filters.offset {
            params.push("offset", offset.to_string());
        }
        if let Some(sort_by) = filters.sort_by.as_deref().filter(|s| !s.is_empty()) {
            params.push("sort_by", sort_by);
        }
        if let Some(sort_dir) = filters.sort_dir.as_deref().filter(|s| !s.is_empty()) {
            params.push("sort_dir", sort_dir);
        }

        log::debug!("built listing query: {}", params.to_query_string());
        Ok(params)
    }

    /// Reconstruct filters from listing query parameters.
    ///
    /// Inverse of `build` for every field it emits. Unknown keys are ignored,
    /// the same way the listing service ignores them.
    pub fn parse(&self, params: &QueryParams) -> Result<ContractFilters, CoreError> {
        let mut filters = ContractFilters::default();

        for (key, value) in params.pairs() {
            match key.as_str() {
                "energy_type" => filters.energy_type.push(EnergyType::from(value.as_str())),
                "price_min" => filters.price_min = Some(parse_number(key, value)?),
                "price_max" => filters.price_max = Some(parse_number(key, value)?),
                "qty_min" => filters.qty_min = Some(parse_number(key, value)?),
                "qty_max" => filters.qty_max = Some(parse_number(key, value)?),
                "location" => filters.location = Some(value.clone()),
                "delivery_start_min" => filters.delivery_start_min = Some(parse_date(key, value)?),
                "delivery_end_max" => filters.delivery_end_max = Some(parse_date(key, value)?),
                "status" => {
                    filters.status = Some(
                        value
                            .parse::<ContractStatus>()
                            .map_err(CoreError::InvalidFilter)?,
                    )
                }
                "limit" => filters.limit = Some(parse_integer(key, value)?),
                "offset" => filters.offset = Some(parse_integer(key, value)?),
                "sort_by" => filters.sort_by = Some(value.clone()),
                "sort_dir" => filters.sort_dir = Some(value.clone()),
                other => log::debug!("ignoring unknown query parameter '{other}'"),
            }
        }

        Ok(filters)
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Rust's `Display` for `f64` is the shortest string that parses back to the
/// same value, and never uses exponent notation.
fn push_number(params: &mut QueryParams, key: &str, value: Option<f64>) -> Result<(), CoreError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(CoreError::InvalidFilter(format!(
                "{key} must be a finite number, got {v}"
            )));
        }
        params.push(key, v.to_string());
    }
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_number(key: &str, value: &str) -> Result<f64, CoreError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::InvalidFilter(format!("{key}: '{value}' is not a finite number")))
}

fn parse_integer(key: &str, value: &str) -> Result<u64, CoreError> {
    value
        .parse::<u64>()
        .map_err(|_| CoreError::InvalidFilter(format!("{key}: '{value}' is not a non-negative integer")))
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidFilter(format!("{key}: '{value}' is not a YYYY-MM-DD date")))
}
