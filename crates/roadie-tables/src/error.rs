//! Error types for the data table engine

use crate::row::RowId;
use thiserror::Error;

/// Data table error type
#[derive(Debug, Error)]
pub enum TableError {
	/// A column index does not exist in the column set
	#[error("Column index {index} is out of range ({count} columns)")]
	ColumnOutOfRange {
		/// Requested index
		index: usize,
		/// Number of configured columns
		count: usize,
	},

	/// The column exists but is declared non-sortable
	#[error("Column '{0}' is not sortable")]
	ColumnNotSortable(String),

	/// Page sizes must be at least one row
	#[error("Invalid page size: {0}")]
	InvalidPageSize(usize),

	/// Configuration rejected by validation
	#[error("Invalid table configuration: {0}")]
	InvalidConfig(String),

	/// Configuration text could not be parsed
	#[error("Failed to parse table configuration: {0}")]
	ConfigParse(#[from] toml::de::Error),

	/// A JSON record could not be used as a table row
	#[error("Invalid record: {0}")]
	InvalidRecord(String),

	/// No row with the given identifier exists in the current collection
	#[error("Row '{0}' not found")]
	RowNotFound(RowId),

	/// The host did not supply the callback this action needs
	#[error("Action '{0}' is not available for this table")]
	ActionUnavailable(&'static str),

	/// The host callback reported a failure
	#[error("Host action '{action}' failed: {message}")]
	ActionFailed {
		/// Name of the action that was invoked
		action: &'static str,
		/// Message reported by the host
		message: String,
	},

	/// Rendering an export document failed
	#[error("Export error: {0}")]
	Export(String),

	/// Writing an export artifact failed
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for data table operations
pub type Result<T> = std::result::Result<T, TableError>;
