//! Core module containing the list pipeline and the domain rules around it

pub mod auth;
pub mod error;
pub mod field;
pub mod format;
pub mod pipeline;
pub mod query;
pub mod sales;
pub mod search;
pub mod sort;
pub mod upload;
pub mod workflow;

pub use auth::{AccessPolicy, CurrentUser, MenuItem, Module, Role};
pub use error::{ConfigError, GestorError, QueryError, SalesError, UploadError, WorkflowError};
pub use field::{FieldPath, FieldSource};
pub use pipeline::ListView;
pub use query::{ListParams, Page, PageWindow, PaginationMeta};
pub use sales::{PaymentStatus, SaleLine};
pub use sort::{Comparator, SortDirection, SortSpec};
pub use workflow::{WorkOrderAction, WorkOrderStatus};
