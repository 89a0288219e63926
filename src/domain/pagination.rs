use serde::{Deserialize, Serialize};

/// Page size used when a view is created without an explicit one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// ceil(total_items / page_size), floored at 1 so an empty result set still
/// has a first page to stand on.
pub fn total_pages_for(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(page_size as u64);
    pages.clamp(1, u32::MAX as u64) as u32
}

/// The current page/page-size/derived-totals bundle for a server-paginated
/// list. Totals and navigation flags are derived, never set directly; the
/// server response resynchronizes them after every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    /// Fresh cursor on page 1 with nothing loaded yet.
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            total_items: 0,
            has_next: false,
            has_previous: false,
        }
    }

    /// Back to page 1, keeping the page size. Totals keep their last known
    /// values until the next response resynchronizes them.
    pub fn reset_to_first_page(&mut self) {
        self.current_page = 1;
        self.recompute_flags();
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
        self.recompute_flags();
    }

    /// Resynchronize from a server response. The response's page, page size
    /// and total count are authoritative over anything held locally.
    pub fn apply_response(&mut self, page: u32, page_size: u32, total_items: u64) {
        self.current_page = page.max(1);
        self.page_size = page_size.max(1);
        self.total_items = total_items;
        self.total_pages = total_pages_for(total_items, self.page_size);
        self.recompute_flags();
    }

    fn recompute_flags(&mut self) {
        self.has_next = self.current_page < self.total_pages;
        self.has_previous = self.current_page > 1;
    }
}
