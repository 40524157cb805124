//! Column descriptor

use super::accessor::Accessor;
use crate::row::Row;
use crate::value::CellValue;
use std::fmt::Debug;

/// Display projection for a cell: receives the raw value and the row
pub type CellRenderer<R> = Box<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// Table column definition
///
/// Each column is responsible for:
/// - Providing the header text
/// - Extracting the raw value from a row (sorting, search, export)
/// - Optionally rendering that value for display
/// - Declaring whether it can be sorted
///
/// # Example
///
/// ```rust
/// use roadie_tables::{CellValue, Column, Record, Row};
///
/// let status = Column::<Record>::field("Status", "status")
///     .cell(|value, _row| format!("[{}]", value));
///
/// let record = Record::try_from(serde_json::json!({"id": 1, "status": "active"})).unwrap();
/// assert_eq!(status.raw_value(&record), CellValue::from("active"));
/// assert_eq!(status.display_value(&record), "[active]");
/// ```
pub struct Column<R> {
	header: String,
	accessor: Accessor<R>,
	cell: Option<CellRenderer<R>>,
	sortable: bool,
}

impl<R: Row> Column<R> {
	/// Creates a column with the given accessor
	pub fn new(header: impl Into<String>, accessor: Accessor<R>) -> Self {
		Self {
			header: header.into(),
			accessor,
			cell: None,
			sortable: true,
		}
	}

	/// Creates a column reading a named field
	pub fn field(header: impl Into<String>, field: impl Into<String>) -> Self {
		Self::new(header, Accessor::field(field))
	}

	/// Creates a column computing its value from the row
	pub fn derived<F>(header: impl Into<String>, f: F) -> Self
	where
		F: Fn(&R) -> CellValue + Send + Sync + 'static,
	{
		Self::new(header, Accessor::derived(f))
	}

	/// Sets the display renderer
	pub fn cell<F>(mut self, renderer: F) -> Self
	where
		F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
	{
		self.cell = Some(Box::new(renderer));
		self
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Returns the header text
	pub fn header(&self) -> &str {
		&self.header
	}

	/// Returns the accessor
	pub fn accessor(&self) -> &Accessor<R> {
		&self.accessor
	}

	/// Returns whether this column can be sorted
	///
	/// Default: true
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether a display renderer is configured
	pub fn has_renderer(&self) -> bool {
		self.cell.is_some()
	}

	/// Extracts the raw value for `row`
	pub fn raw_value(&self, row: &R) -> CellValue {
		self.accessor.resolve(row)
	}

	/// Renders the display text for `row`
	///
	/// Without a renderer this is the raw value's text.
	pub fn display_value(&self, row: &R) -> String {
		let raw = self.raw_value(row);
		match &self.cell {
			Some(render) => render(&raw, row),
			None => raw.to_string(),
		}
	}
}

impl<R> Debug for Column<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Column")
			.field("header", &self.header)
			.field("accessor", &self.accessor)
			.field("has_renderer", &self.cell.is_some())
			.field("sortable", &self.sortable)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::row::RowId;
	use rstest::rstest;

	#[derive(Debug)]
	struct TestRow {
		id: i64,
		value: String,
		verified: bool,
	}

	impl Row for TestRow {
		fn id(&self) -> RowId {
			RowId::Int(self.id)
		}

		fn field(&self, name: &str) -> CellValue {
			match name {
				"value" => CellValue::from(self.value.as_str()),
				"verified" => CellValue::Bool(self.verified),
				_ => CellValue::Null,
			}
		}
	}

	fn row() -> TestRow {
		TestRow {
			id: 1,
			value: "Hello".to_string(),
			verified: true,
		}
	}

	#[rstest]
	fn test_column_creation() {
		let column = Column::<TestRow>::field("Test Column", "value");
		assert_eq!(column.header(), "Test Column");
		assert!(column.is_sortable());
		assert!(!column.has_renderer());
		assert_eq!(column.accessor().field_name(), Some("value"));
	}

	#[rstest]
	fn test_column_builder() {
		let column = Column::<TestRow>::field("Test", "value").sortable(false);
		assert!(!column.is_sortable());
	}

	#[rstest]
	fn test_display_without_renderer_is_raw_text() {
		let column = Column::<TestRow>::field("Test", "value");
		assert_eq!(column.display_value(&row()), "Hello");
	}

	#[rstest]
	fn test_renderer_only_affects_display() {
		// Arrange
		let column = Column::<TestRow>::field("Verified", "verified").cell(|value, _| {
			if value == &CellValue::Bool(true) {
				"<span class=\"badge\">✔</span>".to_string()
			} else {
				String::new()
			}
		});

		// Act
		let raw = column.raw_value(&row());
		let display = column.display_value(&row());

		// Assert
		assert_eq!(raw, CellValue::Bool(true));
		assert_eq!(display, "<span class=\"badge\">✔</span>");
	}

	#[rstest]
	fn test_renderer_receives_row() {
		let column = Column::<TestRow>::derived("Label", |r: &TestRow| r.id.into())
			.cell(|value, r| format!("#{} {}", value, r.value));
		assert_eq!(column.display_value(&row()), "#1 Hello");
	}
}
