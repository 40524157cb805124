//! JSON exporter

use super::ExportDocument;
use crate::error::{Result, TableError};
use crate::row::Row;
use crate::value::CellValue;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
	title: &'a str,
	scope: &'static str,
	generated_at: String,
	columns: Vec<&'a str>,
	rows: Vec<Vec<CellValue>>,
}

/// JSON exporter
///
/// Rows are emitted as arrays of raw values in column order, next to the
/// header list, so column order survives and numbers stay numbers.
pub struct JsonExporter;

impl JsonExporter {
	/// Export a document to JSON
	pub fn export<R: Row>(document: &ExportDocument<'_, R>) -> Result<Vec<u8>> {
		let report = JsonReport {
			title: document.title,
			scope: document.scope.label(),
			generated_at: document.generated_at.to_rfc3339(),
			columns: document.headers(),
			rows: document
				.rows
				.iter()
				.map(|row| document.columns.iter().map(|c| c.raw_value(row)).collect())
				.collect(),
		};

		serde_json::to_vec_pretty(&report)
			.map_err(|e| TableError::Export(format!("JSON export failed: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::Column;
	use crate::export::ExportScope;
	use crate::row::Record;
	use chrono::{TimeZone, Utc};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_json_report_shape() {
		let records = vec![Record::try_from(json!({"id": 5, "amount": 12.5, "paid": true})).unwrap()];
		let columns = vec![
			Column::field("ID", "id"),
			Column::field("Amount", "amount"),
			Column::field("Paid", "paid"),
			Column::field("Missing", "missing"),
		];
		let document = ExportDocument {
			title: "Wallet",
			document_name: "Roadie Admin",
			scope: ExportScope::Selected,
			generated_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
			columns: &columns,
			rows: records.iter().collect(),
		};

		let value: serde_json::Value =
			serde_json::from_slice(&JsonExporter::export(&document).unwrap()).unwrap();

		assert_eq!(
			value,
			json!({
				"title": "Wallet",
				"scope": "selected",
				"generated_at": "2024-01-02T03:04:05+00:00",
				"columns": ["ID", "Amount", "Paid", "Missing"],
				"rows": [[5, 12.5, true, null]],
			})
		);
	}
}
