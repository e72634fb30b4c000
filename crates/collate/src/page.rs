//! Pagination: windowing an ordered collection into fixed-size pages.
//!
//! Pages are 1-based. The configuration is plain caller-owned state and the
//! navigation helpers mutate it in place; the windowing itself borrows a
//! slice of the input and copies nothing.

use crate::error::{CollateError, Result};

/// Default page size.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Pagination state, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Current page, 1-based.
    pub page: usize,
    /// Records per page.
    pub per_page: usize,
}

impl PaginationConfig {
    /// Creates a configuration on page 1 with the given page size.
    pub fn new(per_page: usize) -> Self {
        PaginationConfig { page: 1, per_page }
    }

    /// Number of pages needed for `count` records.
    ///
    /// The last page may be partial. Returns 0 for an empty collection or
    /// a zero page size.
    pub fn total_pages(&self, count: usize) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        count.div_ceil(self.per_page)
    }

    /// Advances to the next page, a no-op on the last page.
    pub fn next_page(&mut self, count: usize) {
        if self.page < self.total_pages(count) {
            self.page += 1;
        }
    }

    /// Steps back to the previous page, a no-op on page 1.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Jumps to an arbitrary page.
    ///
    /// # Errors
    ///
    /// Returns [`CollateError::PageOutOfBounds`] when `page` is 0 or past
    /// the last page for `count` records; the configuration is left
    /// unchanged.
    pub fn set_page(&mut self, page: usize, count: usize) -> Result<()> {
        let total_pages = self.total_pages(count);
        if page < 1 || page > total_pages {
            return Err(CollateError::PageOutOfBounds { page, total_pages });
        }
        self.page = page;
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig::new(DEFAULT_PER_PAGE)
    }
}

/// Returns the window of `items` on the configured page.
///
/// A page past the end of the collection, or a zero page size, yields an
/// empty slice rather than an error; navigating to such a page is the
/// caller's mistake, but deriving the view from it must still be total.
///
/// # Example
///
/// ```
/// use collate::{paginated_data, PaginationConfig};
///
/// let data: Vec<i32> = (1..=25).collect();
/// let mut pages = PaginationConfig::new(10);
/// pages.page = 3;
///
/// assert_eq!(paginated_data(&data, &pages), &[21, 22, 23, 24, 25]);
/// ```
pub fn paginated_data<'a, T>(items: &'a [T], config: &PaginationConfig) -> &'a [T] {
    if config.per_page == 0 || config.page == 0 {
        return &[];
    }
    let start = (config.page - 1).saturating_mul(config.per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(config.per_page).min(items.len());
    &items[start..end]
}

/// Renders a summary of the current window, e.g. `"Showing 11 - 20 of 43
/// results"`.
///
/// `count` is the total number of records being paginated, not the size of
/// the current page. Total over the same degenerate inputs as
/// [`paginated_data`]: a zero page renders as page 1.
pub fn results_count_text(count: usize, config: &PaginationConfig) -> String {
    if count == 0 {
        return "No results".to_string();
    }
    if count == 1 {
        return "Showing 1 result".to_string();
    }
    if count <= config.per_page {
        return format!("Showing all {count} results");
    }
    let page = config.page.max(1);
    let start = (page - 1).saturating_mul(config.per_page) + 1;
    let end = page.saturating_mul(config.per_page).min(count);
    format!("Showing {start} - {end} of {count} results")
}
