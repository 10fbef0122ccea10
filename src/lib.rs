//! # Gestor
//!
//! List-screen logic for a small business management front-end: clients,
//! products and inventory, sales, work orders, reports and role-based
//! administration.
//!
//! ## Features
//!
//! - **Stable Sorting**: Order records by any dotted field path, ascending or
//!   descending, keeping ties in their original order
//! - **Search**: Case-insensitive substring search over a screen's fields
//! - **Pagination**: Page windows that never panic, with footer metadata
//! - **Screen Configuration**: Search fields, default sort and page sizes
//!   per screen, loaded from YAML
//! - **Access Rules**: Role → module mapping for navigation and guarded
//!   screens
//! - **Sales**: Line subtotals, outstanding balances and payment checks
//! - **Work Orders**: Status lifecycle and the actions offered in each state
//!
//! ## Quick Start
//!
//! ```rust
//! use gestor::prelude::*;
//! use serde_json::json;
//!
//! let clientes = vec![
//!     json!({"id": 1, "nombre": "Ana", "monto": 50}),
//!     json!({"id": 2, "nombre": "Beto", "monto": 200}),
//!     json!({"id": 3, "nombre": "Ana", "monto": 10}),
//! ];
//!
//! let mut view = ListView::new(["nombre"])
//!     .with_sort(SortSpec::desc("monto"))
//!     .with_window(PageWindow::new(0, 1));
//! view.set_query("ana");
//!
//! let page = view.apply(&clientes);
//! assert_eq!(page.rows, vec![&clientes[0]]);
//! assert_eq!(page.pagination.total_pages, 2);
//! ```

pub mod config;
pub mod core;

/// Re-exports of commonly used types and functions
pub mod prelude {
    // === Records & Paths ===
    pub use crate::core::field::{FieldPath, FieldSource, resolve_path};

    // === Sorting ===
    pub use crate::core::sort::{
        Comparator, SortDirection, SortSpec, compare_descending_by_path, compare_values,
        make_comparator, sort_stable,
    };

    // === Search & Pagination ===
    pub use crate::core::pipeline::ListView;
    pub use crate::core::query::{ListParams, Page, PageWindow, PaginationMeta, paginate, top_n};
    pub use crate::core::search::filter_by_query;

    // === Domain Rules ===
    pub use crate::core::auth::{AccessPolicy, CurrentUser, MenuItem, Module, Role};
    pub use crate::core::format::{format_currency, format_timestamp, parse_backend_timestamp};
    pub use crate::core::sales::{
        PaymentStatus, SaleLine, outstanding_balance, sale_subtotal, validate_payment_amount,
        validate_sale,
    };
    pub use crate::core::upload::{FileKind, UploadKind, validate_upload};
    pub use crate::core::workflow::{
        CloseOrderPayment, WorkOrderAction, WorkOrderStatus, available_actions, transition,
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, ErrorResponse, GestorError, QueryError, SalesError, UploadError,
        WorkflowError,
    };

    // === Config ===
    pub use crate::config::{ScreenConfig, ScreensConfig};

    // === External re-exports ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;
}
