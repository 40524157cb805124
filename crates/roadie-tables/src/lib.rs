//! Data table engine for the roadie admin back office
//!
//! Every list screen of the admin (riders, roadies, service requests, wallets,
//! email campaigns, landing-page content) renders its rows through the same
//! [`DataTable`]. The host page hands the table an in-memory collection of rows
//! and a set of column descriptors; the table answers with a render model and
//! invokes the host's callbacks with the rows the user acted on.
//!
//! # Features
//!
//! - **Columns**: static field accessors or derived accessors, with an optional
//!   display renderer that never leaks into sorting or export
//! - **Sorting**: header-click sorting with a descending identifier fallback
//! - **Pagination**: fixed-size pages with clamped navigation
//! - **Selection**: per-row and page-scoped select-all, plus a bulk action bar
//! - **Confirmation**: a single pending-action gate for delete/restore actions
//! - **Export**: CSV, PDF and JSON documents over all rows or the selection
//!
//! # Architecture
//!
//! ```text
//! rows + columns ──> search ──> sort ──> paginate ──> TableView
//!                                  │
//!                                  ├──> selection ──> confirm gate ──> host callbacks
//!                                  │
//!                                  └──> export ──> ExportSink
//! ```
//!
//! The host remains the single source of truth for the collection: after any
//! callback it re-supplies the rows with [`DataTable::set_rows`], and the table
//! re-derives its views from them.
//!
//! # Example
//!
//! ```rust
//! use roadie_tables::{CellValue, Column, DataTable, Row, RowId, TableConfig};
//!
//! struct Rider {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Row for Rider {
//!     fn id(&self) -> RowId {
//!         RowId::Int(self.id)
//!     }
//! }
//!
//! let columns = vec![
//!     Column::derived("ID", |rider: &Rider| CellValue::from(rider.id)),
//!     Column::derived("Name", |rider: &Rider| CellValue::from(rider.name.as_str())),
//! ];
//!
//! let config = TableConfig {
//!     page_size: 2,
//!     default_sort_by: Some(roadie_tables::config::DefaultSortBy::Id),
//!     ..TableConfig::default()
//! };
//!
//! let table = DataTable::new(columns, config)
//!     .unwrap()
//!     .with_rows(vec![
//!         Rider { id: 1, name: "A".to_string() },
//!         Rider { id: 2, name: "B".to_string() },
//!         Rider { id: 3, name: "C".to_string() },
//!     ]);
//!
//! let ids: Vec<RowId> = table.visible_rows().iter().map(|r| r.id()).collect();
//! assert_eq!(ids, vec![RowId::Int(3), RowId::Int(2)]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod actions;
pub mod column;
pub mod config;
pub mod confirm;
pub mod error;
pub mod export;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;
pub mod value;
pub mod view;

// Re-exports for convenience
pub use actions::{ActionError, ActionResult, TableActions};
pub use column::{Accessor, Column};
pub use config::TableConfig;
pub use confirm::{ActionKind, ConfirmDialog, ConfirmText};
pub use error::{Result, TableError};
pub use export::{ExportArtifact, ExportFormat, ExportScope, ExportSink};
pub use pagination::{PageWindow, Pagination};
pub use row::{Record, Row, RowId};
pub use selection::Selection;
pub use sort::{SortDirection, SortState};
pub use table::{ActionStatus, DataTable};
pub use value::CellValue;
pub use view::TableView;
