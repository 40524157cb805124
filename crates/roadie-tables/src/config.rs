//! Table configuration
//!
//! Plain data settings for a list screen. Everything that needs a closure
//! (callbacks, dynamic confirmation texts) lives in [`crate::TableActions`].
//!
//! # Example
//!
//! ```rust
//! use roadie_tables::TableConfig;
//! use roadie_tables::config::DefaultSortBy;
//!
//! let config = TableConfig::from_toml(
//!     r#"
//!     title = "Service Requests"
//!     page_size = 25
//!     default_sort_by = "external_id"
//!     external_id_key = "request_number"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.page_size, 25);
//! assert_eq!(config.default_sort_by, Some(DefaultSortBy::ExternalId));
//! assert!(config.confirm_action);
//! ```

use crate::error::{Result, TableError};
use crate::sort::{DefaultSort, SortDirection};
use serde::{Deserialize, Serialize};

/// Which identifier the default sort reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSortBy {
	/// The row identifier
	Id,
	/// The field named by `external_id_key`
	ExternalId,
}

/// What happens to the selection after a confirmed bulk action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkSelectionPolicy {
	/// Clear only when the host callback returns `Ok`, so a failed action can
	/// be retried without re-selecting
	#[default]
	PreserveOnFailure,
	/// Clear whatever the callback returns
	ClearAlways,
}

/// Settings for one data table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
	/// Report title, also the base of export filenames
	pub title: String,
	/// Application name printed in the PDF title block
	pub document_name: String,
	/// Rows per page
	pub page_size: usize,
	/// Page sizes offered by the page-size picker
	pub page_size_options: Vec<usize>,
	/// Column sorted on first render
	pub initial_sort_column: Option<usize>,
	/// Direction used by the first column sort
	pub initial_sort_direction: SortDirection,
	/// Route delete/restore through a confirmation dialog
	pub confirm_action: bool,
	/// Identifier fallback used while no column is sorted
	pub default_sort_by: Option<DefaultSortBy>,
	/// Field holding the external identifier
	pub external_id_key: Option<String>,
	/// Selection handling after bulk actions
	pub bulk_selection: BulkSelectionPolicy,
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			title: "Export".to_string(),
			document_name: "Roadie Admin".to_string(),
			page_size: 10,
			page_size_options: vec![10, 25, 50, 100],
			initial_sort_column: None,
			initial_sort_direction: SortDirection::Ascending,
			confirm_action: true,
			default_sort_by: None,
			external_id_key: None,
			bulk_selection: BulkSelectionPolicy::default(),
		}
	}
}

impl TableConfig {
	/// Parses and validates a TOML configuration
	pub fn from_toml(source: &str) -> Result<Self> {
		let config: TableConfig = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the settings for consistency
	pub fn validate(&self) -> Result<()> {
		if self.page_size == 0 {
			return Err(TableError::InvalidPageSize(0));
		}
		if self.page_size_options.contains(&0) {
			return Err(TableError::InvalidConfig(
				"page_size_options must not contain 0".to_string(),
			));
		}
		if self.default_sort_by == Some(DefaultSortBy::ExternalId)
			&& self
				.external_id_key
				.as_deref()
				.is_none_or(|key| key.trim().is_empty())
		{
			return Err(TableError::InvalidConfig(
				"default_sort_by = \"external_id\" requires external_id_key".to_string(),
			));
		}
		Ok(())
	}

	/// Resolves the identifier fallback used by the sort engine
	pub fn default_sort(&self) -> Option<DefaultSort> {
		match self.default_sort_by? {
			DefaultSortBy::Id => Some(DefaultSort::Id),
			DefaultSortBy::ExternalId => self
				.external_id_key
				.clone()
				.map(DefaultSort::ExternalId),
		}
	}
}
