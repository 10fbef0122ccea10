//! The search → sort → paginate pipeline behind every list screen
//!
//! A [`ListView`] holds one screen's explicit state: the search text, the
//! searchable fields, the sort column and the page window. The hosting UI
//! owns it, mutates it in response to events, and calls [`ListView::apply`]
//! with the current records every time something changes. Nothing is cached
//! between calls.
//!
//! # Example
//!
//! ```
//! use gestor::core::pipeline::ListView;
//! use gestor::core::sort::SortSpec;
//! use serde_json::json;
//!
//! let ventas = vec![
//!     json!({"id": 1, "cliente": {"nombre": "Ana"}, "total": 50}),
//!     json!({"id": 2, "cliente": {"nombre": "Beto"}, "total": 200}),
//! ];
//!
//! let mut view = ListView::new(["cliente.nombre"]);
//! view.set_sort(Some(SortSpec::desc("total")));
//! let page = view.apply(&ventas);
//! assert_eq!(page.rows[0]["id"], 2);
//! assert_eq!(page.pagination.total, 2);
//! ```

use crate::core::field::{FieldPath, FieldSource};
use crate::core::query::{Page, PageWindow, PaginationMeta, paginate};
use crate::core::search::filter_by_query;
use crate::core::sort::{SortSpec, sort_stable};

/// Explicit state of one list screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListView {
    query: String,
    fields: Vec<FieldPath>,
    sort: Option<SortSpec>,
    window: PageWindow,
}

impl ListView {
    /// A view searching the given fields, unsorted, on the first page
    pub fn new<I, P>(fields: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_window(mut self, window: PageWindow) -> Self {
        self.window = window;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fields(&self) -> &[FieldPath] {
        &self.fields
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// New search text; results start again from the first page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.window = self.window.with_page(0);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Column header click, see [`SortSpec::request_sort`]
    pub fn request_sort(&mut self, field: impl Into<FieldPath>) {
        self.sort = Some(SortSpec::request_sort(self.sort.as_ref(), field));
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.window = self.window.with_page(page_index);
    }

    /// New rows-per-page; goes back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.window = self.window.with_page_size(page_size);
    }

    /// Run the pipeline over `source`
    ///
    /// Filter first, then sort the matches, then cut the page. The page
    /// metadata counts the filtered rows.
    pub fn apply<'a, R: FieldSource>(&self, source: &'a [R]) -> Page<&'a R> {
        let filtered = filter_by_query(source, &self.query, &self.fields);

        let ordered = match &self.sort {
            Some(spec) => {
                let comparator = spec.comparator();
                sort_stable(&filtered, |a, b| comparator.compare(a, b))
            }
            None => filtered,
        };

        let rows = paginate(&ordered, self.window.page_index, self.window.page_size).to_vec();
        let pagination = PaginationMeta::new(self.window, ordered.len());

        tracing::trace!(
            source = source.len(),
            matched = ordered.len(),
            shown = rows.len(),
            page = self.window.page_index,
            "list view applied"
        );

        Page { rows, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn ids(rows: &[&Value]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    fn productos() -> Vec<Value> {
        (1..=12)
            .map(|i| json!({"id": i, "nombre": format!("Producto {i}"), "precio": (i % 4) * 100}))
            .collect()
    }

    #[test]
    fn test_unsorted_view_keeps_source_order() {
        let records = productos();
        let page = ListView::new(["nombre"]).apply(&records);
        assert_eq!(ids(&page.rows), (1..=10).collect::<Vec<_>>());
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_query_resets_page() {
        let mut view = ListView::new(["nombre"]);
        view.set_page(1);
        view.set_query("producto 1");
        assert_eq!(view.window().page_index, 0);

        let records = productos();
        let page = view.apply(&records);
        // Producto 1, 10, 11, 12
        assert_eq!(ids(&page.rows), vec![1, 10, 11, 12]);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = ListView::new(["nombre"]);
        view.set_page(3);
        view.set_page_size(5);
        assert_eq!(view.window(), PageWindow::new(0, 5));
    }

    #[test]
    fn test_sort_is_stable_within_price() {
        let records = productos();
        let view = ListView::new(["nombre"])
            .with_sort(SortSpec::desc("precio"))
            .with_window(PageWindow::new(0, 12));
        let page = view.apply(&records);
        // precio 300: 3,7,11; 200: 2,6,10; 100: 1,5,9; 0: 4,8,12
        assert_eq!(ids(&page.rows), vec![3, 7, 11, 2, 6, 10, 1, 5, 9, 4, 8, 12]);
    }

    #[test]
    fn test_request_sort_toggles() {
        let mut view = ListView::new(["nombre"]);
        view.request_sort("precio");
        assert_eq!(view.sort(), Some(&SortSpec::asc("precio")));
        view.request_sort("precio");
        assert_eq!(view.sort(), Some(&SortSpec::desc("precio")));
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let records = productos();
        let view = ListView::new(["nombre"]).with_window(PageWindow::new(5, 10));
        let page = view.apply(&records);
        assert!(page.rows.is_empty());
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.pagination.from, 0);
    }

    #[test]
    fn test_apply_does_not_mutate_source() {
        let records = productos();
        let before = records.clone();
        let mut view = ListView::new(["nombre"]).with_sort(SortSpec::asc("precio"));
        view.set_query("2");
        let _ = view.apply(&records);
        assert_eq!(records, before);
    }
}
