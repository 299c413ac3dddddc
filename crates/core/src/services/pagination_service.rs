use crate::errors::CoreError;
use crate::models::contract::ContractListResponse;
use crate::models::pagination::PageInfo;

/// Page arithmetic for offset/limit listings.
pub struct PaginationService;

impl PaginationService {
    pub fn new() -> Self {
        Self
    }

    /// Compute page position and navigation targets.
    ///
    /// The caller's `offset` is taken as-is, even past `total` (an empty
    /// page). Only the computed previous offset is clamped at 0.
    pub fn page_info(&self, total: u64, limit: u64, offset: u64) -> Result<PageInfo, CoreError> {
        if limit == 0 {
            return Err(CoreError::InvalidPagination(
                "limit must be positive".into(),
            ));
        }

        let next_offset = offset.saturating_add(limit);

        Ok(PageInfo {
            total,
            limit,
            offset,
            page: offset / limit + 1,
            total_pages: total.div_ceil(limit),
            has_previous: offset > 0,
            previous_offset: offset.saturating_sub(limit),
            has_next: next_offset < total,
            next_offset,
        })
    }

    /// Page info for a fetched listing envelope.
    pub fn for_response(&self, response: &ContractListResponse) -> Result<PageInfo, CoreError> {
        self.page_info(response.total, response.limit, response.offset)
    }
}

impl Default for PaginationService {
    fn default() -> Self {
        Self::new()
    }
}
