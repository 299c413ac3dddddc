use serde::{Deserialize, Serialize};

/// Navigation state for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,

    pub limit: u64,

    /// Offset as supplied by the caller, never clamped
    pub offset: u64,

    /// 1-based page number
    pub page: u64,

    /// 0 when there are no results
    pub total_pages: u64,

    pub has_previous: bool,

    pub previous_offset: u64,

    pub has_next: bool,

    pub next_offset: u64,
}

impl PageInfo {
    /// Navigation controls are only worth showing when results span pages.
    pub fn needs_controls(&self) -> bool {
        self.total > self.limit
    }
}
