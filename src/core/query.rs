//! List parameters and pagination utilities

use crate::core::error::QueryError;
use crate::core::sort::SortSpec;
use serde::{Deserialize, Serialize};

/// Largest page a list screen may request
pub const MAX_PAGE_SIZE: usize = 500;

/// List state carried in a URL query string or a saved view
///
/// All parameters have sensible defaults.
///
/// # Example
/// ```
/// use gestor::core::query::ListParams;
///
/// let params: ListParams =
///     serde_json::from_str(r#"{"q": "ana", "sort": "monto:desc", "page": 1}"#).unwrap();
/// assert_eq!(params.page, 1);
/// assert_eq!(params.limit(), 10);
/// assert!(params.sort_spec().unwrap().is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListParams {
    /// Free-text search
    pub q: String,

    /// Sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,

    /// Page index (starts at 0)
    pub page: usize,

    /// Number of rows per page
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            q: String::new(),
            sort: None,
            page: 0,
            limit: default_limit(),
        }
    }
}

impl ListParams {
    /// Get limit, clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// Parse the sort expression, if any
    pub fn sort_spec(&self) -> Result<Option<SortSpec>, QueryError> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(expression) => SortSpec::parse(expression).map(Some),
        }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit())
    }
}

/// The slice of a list shown on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Page index (starts at 0)
    pub page_index: usize,
    /// Rows per page
    pub page_size: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(0, default_limit())
    }
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Index of the first row, `None` on overflow
    pub fn start(&self) -> Option<usize> {
        self.page_index.checked_mul(self.page_size)
    }

    pub fn with_page(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// Change the page size, going back to the first page
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::new(0, page_size)
    }

    /// Move back to the last page that still has rows
    pub fn clamp(self, total: usize) -> Self {
        let pages = total_pages(total, self.page_size);
        let page_index = self.page_index.min(pages.saturating_sub(1));
        Self { page_index, ..self }
    }
}

fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Slice out one page of `records`
///
/// Returns `records[page_index*page_size .. page_index*page_size + page_size]`,
/// cut short at the end. Pages past the end, a zero page size, or an index so
/// large the offset overflows all yield an empty slice.
///
/// ```
/// use gestor::core::query::paginate;
///
/// let rows = [1, 2, 3, 4, 5];
/// assert_eq!(paginate(&rows, 1, 2), &[3, 4]);
/// assert_eq!(paginate(&rows, 2, 2), &[5]);
/// assert!(paginate(&rows, 3, 2).is_empty());
/// ```
pub fn paginate<T>(records: &[T], page_index: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let Some(start) = page_index.checked_mul(page_size) else {
        return &[];
    };
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(records.len());
    &records[start..end]
}

/// "Top N" preview used by report tables and charts
///
/// `None` shows every record.
pub fn top_n<T>(records: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) => &records[..limit.min(records.len())],
        None => records,
    }
}

/// One page of results with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The rows on this page
    pub rows: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page index (starts at 0)
    pub page_index: usize,

    /// Number of rows per page
    pub page_size: usize,

    /// Total number of rows (after search)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,

    /// 1-based number of the first row shown, 0 when nothing is shown
    pub from: usize,

    /// 1-based number of the last row shown, 0 when nothing is shown
    pub to: usize,
}

impl PaginationMeta {
    pub fn new(window: PageWindow, total: usize) -> Self {
        let total_pages = total_pages(total, window.page_size);
        let start = window.start().unwrap_or(usize::MAX);
        let shown = if window.page_size == 0 || start >= total {
            0
        } else {
            window.page_size.min(total - start)
        };

        Self {
            page_index: window.page_index,
            page_size: window.page_size,
            total,
            total_pages,
            has_next: window.page_index.saturating_add(1) < total_pages,
            has_prev: window.page_index > 0 && total_pages > 0,
            from: if shown == 0 { 0 } else { start + 1 },
            to: if shown == 0 { 0 } else { start + shown },
        }
    }

    /// Footer label in the form `11–20 of 45`
    pub fn label(&self) -> String {
        format!("{}–{} of {}", self.from, self.to, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.page, 0);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.sort_spec().unwrap(), None);
    }

    #[test]
    fn test_list_params_limit_clamped() {
        let params = ListParams {
            limit: 0,
            ..Default::default()
        };
        assert_eq!(params.limit(), 1);

        let params = ListParams {
            limit: 10_000,
            ..Default::default()
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_list_params_bad_sort() {
        let params = ListParams {
            sort: Some("monto:sideways".to_string()),
            ..Default::default()
        };
        assert!(params.sort_spec().is_err());
    }

    #[test]
    fn test_paginate_windows() {
        let rows: Vec<i32> = (1..=7).collect();
        assert_eq!(paginate(&rows, 0, 3), &[1, 2, 3]);
        assert_eq!(paginate(&rows, 1, 3), &[4, 5, 6]);
        assert_eq!(paginate(&rows, 2, 3), &[7]);
        assert!(paginate(&rows, 3, 3).is_empty());
    }

    #[test]
    fn test_paginate_degenerate_inputs() {
        let rows = [1, 2, 3];
        assert!(paginate(&rows, 0, 0).is_empty());
        assert!(paginate(&rows, usize::MAX, 2).is_empty());
        assert!(paginate::<i32>(&[], 0, 10).is_empty());
        assert_eq!(paginate(&rows, 0, usize::MAX), &[1, 2, 3]);
    }

    #[test]
    fn test_page_size_change_resets_index() {
        let window = PageWindow::new(4, 10).with_page_size(25);
        assert_eq!(window, PageWindow::new(0, 25));
    }

    #[test]
    fn test_clamp_to_last_page() {
        assert_eq!(PageWindow::new(9, 10).clamp(45).page_index, 4);
        assert_eq!(PageWindow::new(2, 10).clamp(45).page_index, 2);
        assert_eq!(PageWindow::new(3, 10).clamp(0).page_index, 0);
    }

    #[test]
    fn test_top_n() {
        let rows = [5, 4, 3, 2, 1, 0];
        assert_eq!(top_n(&rows, Some(5)), &[5, 4, 3, 2, 1]);
        assert_eq!(top_n(&rows, Some(10)).len(), 6);
        assert_eq!(top_n(&rows, None).len(), 6);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(PageWindow::new(0, 20), 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
        assert_eq!((meta.from, meta.to), (1, 20));

        let last = PaginationMeta::new(PageWindow::new(7, 20), 145);
        assert!(!last.has_next);
        assert!(last.has_prev);
        assert_eq!(last.label(), "141–145 of 145");
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(PageWindow::new(0, 10), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
        assert_eq!(meta.label(), "0–0 of 0");
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: ListParams = serde_json::from_str(r#"{"q": "filtro"}"#).unwrap();
        assert_eq!(params.q, "filtro");
        assert_eq!(params.window(), PageWindow::new(0, 10));
    }
}
