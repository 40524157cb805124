//! CSV exporter

use super::ExportDocument;
use crate::error::{Result, TableError};
use crate::row::Row;
use ::csv::{QuoteStyle, WriterBuilder};

/// CSV exporter
///
/// Writes one header row followed by one record per row. Every field is
/// quote-wrapped with embedded quotes doubled, so delimiters and newlines
/// inside values survive.
pub struct CsvExporter;

impl CsvExporter {
	/// Export a document to CSV
	pub fn export<R: Row>(document: &ExportDocument<'_, R>) -> Result<Vec<u8>> {
		let mut writer = WriterBuilder::new()
			.quote_style(QuoteStyle::Always)
			.from_writer(Vec::new());

		writer
			.write_record(document.headers())
			.map_err(|e| TableError::Export(format!("Failed to write CSV headers: {}", e)))?;

		for row in &document.rows {
			writer
				.write_record(document.row_values(row))
				.map_err(|e| TableError::Export(format!("Failed to write CSV row: {}", e)))?;
		}

		writer
			.flush()
			.map_err(|e| TableError::Export(format!("Failed to flush CSV writer: {}", e)))?;

		writer
			.into_inner()
			.map_err(|e| TableError::Export(format!("Failed to get CSV output: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::Column;
	use crate::export::ExportScope;
	use crate::row::Record;
	use chrono::Utc;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_values_are_quoted_and_escaped() {
		// Arrange
		let records = vec![
			Record::try_from(json!({"id": 1, "note": "flat tyre, \"urgent\"\nnear exit 4"})).unwrap(),
			Record::try_from(json!({"id": 2, "note": null})).unwrap(),
		];
		let columns = vec![Column::field("ID", "id"), Column::field("Note", "note")];
		let document = ExportDocument {
			title: "Requests",
			document_name: "Roadie Admin",
			scope: ExportScope::All,
			generated_at: Utc::now(),
			columns: &columns,
			rows: records.iter().collect(),
		};

		// Act
		let output = String::from_utf8(CsvExporter::export(&document).unwrap()).unwrap();

		// Assert
		assert_eq!(
			output,
			"\"ID\",\"Note\"\n\"1\",\"flat tyre, \"\"urgent\"\"\nnear exit 4\"\n\"2\",\"\"\n"
		);
	}
}
