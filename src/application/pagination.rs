//! Page-number pagination with last-page clamping.
//!
//! Every paginated listing runs its own count query and clamps the requested
//! page into the valid range, so a request far past the end returns the last
//! real page instead of a silently empty one.

use serde::Serialize;

const MAX_PER_PAGE: u32 = 100;

/// A 1-based page request. Construction normalizes out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn per_page(self) -> u32 {
        self.per_page
    }

    /// Clamp against a known total, yielding the effective page and row offset.
    pub fn clamp(self, total: u64) -> ClampedPage {
        let total_pages = total_pages(total, self.per_page);
        let page = self.page.min(total_pages);
        ClampedPage {
            page,
            per_page: self.per_page,
            offset: u64::from(page - 1) * u64::from(self.per_page),
            total_pages,
        }
    }
}

/// A page request resolved against the collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedPage {
    pub page: u32,
    pub per_page: u32,
    pub offset: u64,
    pub total_pages: u32,
}

/// One page of results plus the pagination envelope callers render from.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, clamped: ClampedPage, total: u64) -> Self {
        Self {
            items,
            page: clamped.page,
            per_page: clamped.per_page,
            total,
            total_pages: clamped.total_pages,
        }
    }
}

/// Number of pages needed for `total` rows; never less than one, so an empty
/// collection still has a valid page 1.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if total == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(per_page.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
