//! Page selection for list views.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Raw `page` / `per_page` query values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub per_page: Option<String>,
}

/// A normalized page request. Non-numeric or zero values fall back to the
/// defaults, `per_page` is capped at [`MAX_PER_PAGE`] and `page` is capped
/// so the row offset fits a signed 64-bit OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|n| *n >= 1)
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Self {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        Self {
            page: page.clamp(1, Self::max_page(per_page)),
            per_page,
        }
    }

    /// Largest page whose offset, `(page - 1) * per_page`, is at most `i64::MAX`.
    pub fn max_page(per_page: u64) -> u64 {
        i64::MAX as u64 / per_page.max(1) + 1
    }

    pub fn from_params(params: &PageParams) -> Self {
        let page = positive(params.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let per_page = positive(params.per_page.as_deref()).unwrap_or(DEFAULT_PER_PAGE);
        Self::new(page, per_page)
    }

    /// Zero-based index of the first row, as sea-orm pages count.
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }

    pub fn offset(&self) -> u64 {
        self.page_index().saturating_mul(self.per_page)
    }
}

/// Pagination metadata returned with a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginator {
    pub page: u64,
    pub per_page: u64,
    pub offset: u64,
    pub total_entries_size: u64,
    pub current_entries_size: u64,
    pub total_pages: u64,
}

impl Paginator {
    pub fn new(pagination: Pagination, total_entries_size: u64, current_entries_size: u64) -> Self {
        Self {
            page: pagination.page,
            per_page: pagination.per_page,
            offset: pagination.offset(),
            total_entries_size,
            current_entries_size,
            total_pages: total_entries_size.div_ceil(pagination.per_page),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of rows plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paginator: Paginator,
}
