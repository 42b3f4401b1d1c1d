use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default number of tasks requested per page.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Maximum number of page buttons shown around the current page.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Server-computed pagination snapshot returned alongside a task page.
///
/// The client only echoes this back; it is replaced wholesale on every
/// successful list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Current page, 1-based.
    pub current_page: u32,
    /// Number of pages for the active query.
    pub total_pages: u32,
    /// Number of tasks matching the active query.
    pub total_count: u64,
    /// Page size the server applied.
    pub per_page: u32,
    /// Next page number, `None` on the last page.
    pub next_page: Option<u32>,
    /// Previous page number, `None` on the first page.
    pub prev_page: Option<u32>,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_count: 0,
            per_page: DEFAULT_PER_PAGE,
            next_page: None,
            prev_page: None,
        }
    }
}

impl PaginationInfo {
    /// 1-based positions of the first and last task shown on this page.
    ///
    /// Returns `None` when the query matched nothing.
    #[must_use]
    pub fn display_range(&self) -> Option<(u64, u64)> {
        if self.total_count == 0 {
            return None;
        }
        let per_page = u64::from(self.per_page.max(1));
        let current = u64::from(self.current_page.max(1));
        let start = (current - 1) * per_page + 1;
        let end = (current * per_page).min(self.total_count);
        Some((start, end))
    }

    /// Page numbers to offer as direct jumps, centred on the current page.
    #[must_use]
    pub fn page_window(&self, max_visible: u32) -> RangeInclusive<u32> {
        let total = self.total_pages.max(1);
        let max_visible = max_visible.max(1);
        let current = self.current_page.clamp(1, total);

        let mut start = current.saturating_sub(max_visible / 2).max(1);
        let end = start.saturating_add(max_visible - 1).min(total);
        if end - start + 1 < max_visible {
            start = end.saturating_sub(max_visible - 1).max(1);
        }
        start..=end
    }

    /// Whether the page controls need to be shown at all.
    #[must_use]
    pub const fn is_multi_page(&self) -> bool {
        self.total_pages > 1
    }
}
