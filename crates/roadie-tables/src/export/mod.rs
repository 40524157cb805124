//! Export functionality for table data
//!
//! An export turns either the whole filtered and sorted collection or the
//! resolved selection into a downloadable document. Every format reads the
//! raw accessor values; cell renderers never reach an export.

pub mod csv;
pub mod json;
pub mod pdf;
pub mod sink;

pub use self::csv::CsvExporter;
pub use self::json::JsonExporter;
pub use self::pdf::PdfExporter;
pub use self::sink::{DirectorySink, ExportSink, MemorySink};

use crate::column::Column;
use crate::error::Result;
use crate::row::Row;
use chrono::{DateTime, Utc};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
	/// Comma-separated values
	Csv,
	/// Paginated PDF report
	Pdf,
	/// JSON document
	Json,
}

impl ExportFormat {
	/// Get file extension for this format
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Pdf => "pdf",
			ExportFormat::Json => "json",
		}
	}

	/// Get MIME type for this format
	pub fn mime_type(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv; charset=utf-8",
			ExportFormat::Pdf => "application/pdf",
			ExportFormat::Json => "application/json",
		}
	}
}

/// Which rows an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportScope {
	/// The entire filtered, sorted collection regardless of the current page
	All,
	/// Only the selected rows that still exist
	Selected,
}

impl ExportScope {
	/// Label used in filenames and document metadata
	pub fn label(&self) -> &'static str {
		match self {
			ExportScope::All => "all",
			ExportScope::Selected => "selected",
		}
	}

	/// Human-readable scope line for report headers
	pub fn description(&self, row_count: usize) -> String {
		let noun = if row_count == 1 { "record" } else { "records" };
		match self {
			ExportScope::All => format!("All {} ({})", noun, row_count),
			ExportScope::Selected => format!("Selected {} ({})", noun, row_count),
		}
	}
}

/// A generated export document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
	/// Suggested filename
	pub filename: String,
	/// MIME type
	pub mime_type: String,
	/// Document bytes
	pub data: Vec<u8>,
	/// Number of data rows in the document
	pub row_count: usize,
}

impl ExportArtifact {
	/// Create a new export artifact
	pub fn new(
		filename: impl Into<String>,
		mime_type: impl Into<String>,
		data: Vec<u8>,
		row_count: usize,
	) -> Self {
		Self {
			filename: filename.into(),
			mime_type: mime_type.into(),
			data,
			row_count,
		}
	}

	/// Get data size in bytes
	pub fn size_bytes(&self) -> usize {
		self.data.len()
	}
}

/// Everything an exporter needs to render one document
#[derive(Debug)]
pub struct ExportDocument<'a, R> {
	/// Report title
	pub title: &'a str,
	/// Application name for the title block
	pub document_name: &'a str,
	/// Rows covered
	pub scope: ExportScope,
	/// Generation timestamp
	pub generated_at: DateTime<Utc>,
	/// Columns in declaration order
	pub columns: &'a [Column<R>],
	/// Rows in display order
	pub rows: Vec<&'a R>,
}

impl<R: Row> ExportDocument<'_, R> {
	/// Column headers in declaration order
	pub fn headers(&self) -> Vec<&str> {
		self.columns.iter().map(|c| c.header()).collect()
	}

	/// Raw values of one row as export text
	pub fn row_values(&self, row: &R) -> Vec<String> {
		self.columns
			.iter()
			.map(|c| c.raw_value(row).to_string())
			.collect()
	}

	/// Filename for this document in `format`
	pub fn filename(&self, format: ExportFormat) -> String {
		export_filename(self.title, self.scope, &self.generated_at, format)
	}
}

/// Builds `{normalized-title}-{scope}-{YYYY-MM-DD}.{ext}`.
///
/// The title is lowercased and each run of whitespace becomes one hyphen.
pub fn export_filename(
	title: &str,
	scope: ExportScope,
	generated_at: &DateTime<Utc>,
	format: ExportFormat,
) -> String {
	let normalized = title
		.split_whitespace()
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("-");
	let base = if normalized.is_empty() {
		"export".to_string()
	} else {
		normalized
	};
	format!(
		"{}-{}-{}.{}",
		base,
		scope.label(),
		generated_at.format("%Y-%m-%d"),
		format.extension()
	)
}

/// Renders `document` in `format`
pub fn render<R: Row>(document: &ExportDocument<'_, R>, format: ExportFormat) -> Result<Vec<u8>> {
	match format {
		ExportFormat::Csv => CsvExporter::export(document),
		ExportFormat::Pdf => PdfExporter::default().export(document),
		ExportFormat::Json => JsonExporter::export(document),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;

	fn at() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 0).unwrap()
	}

	#[rstest]
	#[case("Riders", ExportScope::All, ExportFormat::Csv, "riders-all-2024-03-09.csv")]
	#[case(
		"Service  Requests\tQueue",
		ExportScope::Selected,
		ExportFormat::Pdf,
		"service-requests-queue-selected-2024-03-09.pdf"
	)]
	#[case("  ", ExportScope::All, ExportFormat::Json, "export-all-2024-03-09.json")]
	fn test_export_filename(
		#[case] title: &str,
		#[case] scope: ExportScope,
		#[case] format: ExportFormat,
		#[case] expected: &str,
	) {
		assert_eq!(export_filename(title, scope, &at(), format), expected);
	}

	#[rstest]
	fn test_format_metadata() {
		assert_eq!(ExportFormat::Csv.extension(), "csv");
		assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
		assert_eq!(ExportFormat::Json.extension(), "json");
	}

	#[rstest]
	fn test_scope_description() {
		assert_eq!(ExportScope::All.description(3), "All records (3)");
		assert_eq!(ExportScope::Selected.description(1), "Selected record (1)");
	}
}
