//! Client-side pagination over an in-memory record set

use std::ops::Range;
use thiserror::Error;

/// Page sizes the table offers
pub const ROWS_PER_PAGE_OPTIONS: [u32; 4] = [5, 10, 25, 50];

pub const DEFAULT_ROWS_PER_PAGE: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagerError {
    #[error("Unsupported page size {0} (expected one of 5, 10, 25, 50)")]
    UnsupportedPageSize(u32),
}

/// Zero-based page plus rows per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    rows_per_page: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pager with a given page size
    pub fn with_rows_per_page(rows_per_page: u32) -> Result<Self, PagerError> {
        let mut pager = Self::default();
        pager.set_rows_per_page(rows_per_page)?;
        Ok(pager)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    /// Number of pages for `total` records (0 when empty)
    pub fn page_count(&self, total: usize) -> u32 {
        let size = self.rows_per_page as usize;
        total.div_ceil(size) as u32
    }

    /// Move to a page, clamped to the available range
    pub fn set_page(&mut self, page: u32, total: usize) {
        self.page = page;
        self.clamp(total);
    }

    /// Change the page size and go back to the first page
    pub fn set_rows_per_page(&mut self, rows_per_page: u32) -> Result<(), PagerError> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(PagerError::UnsupportedPageSize(rows_per_page));
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Ok(())
    }

    /// Keep the page within `[0, page_count - 1]`
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total).saturating_sub(1);
        self.page = self.page.min(last);
    }

    /// Rows shown on the current page
    pub fn visible_count(&self, total: usize) -> usize {
        let size = self.rows_per_page as usize;
        let offset = self.page as usize * size;
        total.saturating_sub(offset).min(size)
    }

    /// Index range of the current page
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = (self.page as usize * self.rows_per_page as usize).min(total);
        start..start + self.visible_count(total)
    }

    /// Current page of `rows`
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.window(rows.len())]
    }

    /// Footer label, e.g. `6–10 of 12`
    pub fn label(&self, total: usize) -> String {
        let window = self.window(total);
        range_label(window.start as u64, window.len() as u64, total as u64)
    }
}

/// `from–to of total` for a window starting at `offset` with `shown` rows
pub fn range_label(offset: u64, shown: u64, total: u64) -> String {
    if total == 0 || shown == 0 {
        return format!("0–0 of {}", total);
    }
    format!("{}–{} of {}", offset + 1, offset + shown, total)
}
