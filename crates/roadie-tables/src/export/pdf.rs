//! PDF exporter
//!
//! Produces an A4 landscape report: a title block on the first page, a table
//! whose header is repeated on every page, alternating body row backgrounds,
//! and a "Page X of Y" footer on each page. The built-in Helvetica fonts only
//! cover ASCII here, so other characters are written as `?`.

use super::ExportDocument;
use crate::error::Result;
use crate::row::Row;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

const TITLE_BLOCK_HEIGHT: f32 = 76.0;
const HEADER_HEIGHT: f32 = 20.0;
const ROW_HEIGHT: f32 = 18.0;
const FOOTER_HEIGHT: f32 = 24.0;
const CELL_PADDING: f32 = 4.0;
// Average Helvetica glyph width as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.52;

type Rgb = (f32, f32, f32);

const HEADER_FILL: Rgb = (0.18, 0.24, 0.33);
const HEADER_TEXT: Rgb = (1.0, 1.0, 1.0);
const STRIPE_FILL: Rgb = (0.94, 0.95, 0.97);
const BODY_TEXT: Rgb = (0.13, 0.13, 0.13);
const MUTED_TEXT: Rgb = (0.40, 0.40, 0.45);

/// PDF exporter
#[derive(Debug, Clone, PartialEq)]
pub struct PdfExporter {
	/// Page width in points
	pub page_width: f32,
	/// Page height in points
	pub page_height: f32,
	/// Margin on every side in points
	pub margin: f32,
	/// Table font size in points
	pub font_size: f32,
}

impl Default for PdfExporter {
	fn default() -> Self {
		// A4 landscape
		Self {
			page_width: 842.0,
			page_height: 595.0,
			margin: 36.0,
			font_size: 9.0,
		}
	}
}

impl PdfExporter {
	/// Number of body rows that fit on a page
	pub fn rows_per_page(&self, first_page: bool) -> usize {
		let mut available =
			self.page_height - 2.0 * self.margin - FOOTER_HEIGHT - HEADER_HEIGHT;
		if first_page {
			available -= TITLE_BLOCK_HEIGHT;
		}
		((available / ROW_HEIGHT).floor() as usize).max(1)
	}

	/// Splits `total` rows into per-page ranges; always at least one page
	fn page_ranges(&self, total: usize) -> Vec<std::ops::Range<usize>> {
		let mut ranges = Vec::new();
		let mut start = 0;
		loop {
			let end = (start + self.rows_per_page(ranges.is_empty())).min(total);
			ranges.push(start..end);
			if end >= total {
				break;
			}
			start = end;
		}
		ranges
	}

	/// Export a document to PDF
	pub fn export<R: Row>(&self, document: &ExportDocument<'_, R>) -> Result<Vec<u8>> {
		let ranges = self.page_ranges(document.rows.len());
		let page_count = ranges.len();

		let mut next_id = 1;
		let mut alloc = || {
			let id = Ref::new(next_id);
			next_id += 1;
			id
		};
		let catalog_id = alloc();
		let tree_id = alloc();
		let regular_id = alloc();
		let bold_id = alloc();
		let info_id = alloc();
		let pages: Vec<(Ref, Ref)> = (0..page_count).map(|_| (alloc(), alloc())).collect();

		let mut pdf = Pdf::new();
		pdf.catalog(catalog_id).pages(tree_id);
		pdf.pages(tree_id)
			.kids(pages.iter().map(|(page_id, _)| *page_id))
			.count(page_count as i32);
		pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
		pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));
		pdf.document_info(info_id)
			.title(TextStr(document.title))
			.creator(TextStr(document.document_name));

		let headers = document.headers();
		let column_width = self.column_width(headers.len());

		for (index, (range, (page_id, content_id))) in ranges.iter().zip(&pages).enumerate() {
			let mut content = Content::new();
			let mut y = self.page_height - self.margin;

			if index == 0 {
				self.draw_title_block(&mut content, document, y);
				y -= TITLE_BLOCK_HEIGHT;
			}

			y = self.draw_header_row(&mut content, &headers, column_width, y);

			for (stripe, row) in document.rows[range.clone()].iter().enumerate() {
				let values = document.row_values(row);
				y = self.draw_body_row(&mut content, &values, column_width, y, stripe % 2 == 1);
			}

			self.draw_footer(&mut content, index + 1, page_count);

			let mut page = pdf.page(*page_id);
			page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height));
			page.parent(tree_id);
			page.contents(*content_id);
			page.resources()
				.fonts()
				.pair(REGULAR, regular_id)
				.pair(BOLD, bold_id);
			page.finish();

			pdf.stream(*content_id, &content.finish());
		}

		tracing::debug!(
			pages = page_count,
			rows = document.rows.len(),
			"Rendered PDF report"
		);

		Ok(pdf.finish())
	}

	fn column_width(&self, columns: usize) -> f32 {
		let usable = self.page_width - 2.0 * self.margin;
		usable / columns.max(1) as f32
	}

	fn max_chars(&self, width: f32) -> usize {
		(((width - 2.0 * CELL_PADDING) / (self.font_size * GLYPH_WIDTH)).floor() as usize).max(1)
	}

	fn draw_title_block<R: Row>(
		&self,
		content: &mut Content,
		document: &ExportDocument<'_, R>,
		top: f32,
	) {
		let x = self.margin;
		let max_chars = self.max_chars(self.page_width - 2.0 * self.margin);
		let generated = document
			.generated_at
			.format("Generated: %Y-%m-%d %H:%M:%S UTC")
			.to_string();
		let scope = format!(
			"Scope: {}",
			document.scope.description(document.rows.len())
		);

		fill_color(content, MUTED_TEXT);
		show_text(content, BOLD, 10.0, x, top - 10.0, &fit(document.document_name, max_chars));
		fill_color(content, BODY_TEXT);
		show_text(content, BOLD, 18.0, x, top - 32.0, &fit(document.title, max_chars / 2));
		fill_color(content, MUTED_TEXT);
		show_text(content, REGULAR, 9.0, x, top - 48.0, &generated);
		show_text(content, REGULAR, 9.0, x, top - 60.0, &fit(&scope, max_chars));
	}

	fn draw_header_row(
		&self,
		content: &mut Content,
		headers: &[&str],
		column_width: f32,
		top: f32,
	) -> f32 {
		let bottom = top - HEADER_HEIGHT;
		let width = self.page_width - 2.0 * self.margin;
		fill_color(content, HEADER_FILL);
		content.rect(self.margin, bottom, width, HEADER_HEIGHT);
		content.fill_nonzero();

		fill_color(content, HEADER_TEXT);
		let max_chars = self.max_chars(column_width);
		for (i, header) in headers.iter().enumerate() {
			let x = self.margin + i as f32 * column_width + CELL_PADDING;
			show_text(content, BOLD, self.font_size, x, bottom + 6.5, &fit(header, max_chars));
		}
		bottom
	}

	fn draw_body_row(
		&self,
		content: &mut Content,
		values: &[String],
		column_width: f32,
		top: f32,
		striped: bool,
	) -> f32 {
		let bottom = top - ROW_HEIGHT;
		if striped {
			fill_color(content, STRIPE_FILL);
			content.rect(
				self.margin,
				bottom,
				self.page_width - 2.0 * self.margin,
				ROW_HEIGHT,
			);
			content.fill_nonzero();
		}

		fill_color(content, BODY_TEXT);
		let max_chars = self.max_chars(column_width);
		for (i, value) in values.iter().enumerate() {
			let x = self.margin + i as f32 * column_width + CELL_PADDING;
			show_text(content, REGULAR, self.font_size, x, bottom + 5.5, &fit(value, max_chars));
		}
		bottom
	}

	fn draw_footer(&self, content: &mut Content, page: usize, total: usize) {
		let label = format!("Page {} of {}", page, total);
		let width = label.len() as f32 * 8.0 * GLYPH_WIDTH;
		let x = (self.page_width - width) / 2.0;
		fill_color(content, MUTED_TEXT);
		show_text(content, REGULAR, 8.0, x, self.margin - 12.0, &label);
	}
}

fn fill_color(content: &mut Content, (r, g, b): Rgb) {
	content.set_fill_rgb(r, g, b);
}

fn show_text(content: &mut Content, font: Name<'_>, size: f32, x: f32, y: f32, text: &str) {
	content.begin_text();
	content.set_font(font, size);
	content.next_line(x, y);
	content.show(Str(text.as_bytes()));
	content.end_text();
}

/// Reduces `text` to printable ASCII and truncates it to `max_chars`
fn fit(text: &str, max_chars: usize) -> String {
	let sanitized: String = text
		.chars()
		.map(|c| match c {
			' '..='~' => c,
			'\n' | '\r' | '\t' => ' ',
			_ => '?',
		})
		.collect();
	if sanitized.len() <= max_chars {
		return sanitized;
	}
	if max_chars <= 3 {
		return sanitized[..max_chars].to_string();
	}
	format!("{}...", &sanitized[..max_chars - 3])
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

	fn records(count: i64) -> Vec<Record> {
		(1..=count)
			.map(|id| Record::try_from(json!({"id": id, "name": format!("Roadie {}", id)})).unwrap())
			.collect()
	}

	fn render(records: &[Record]) -> String {
		let columns = vec![Column::field("ID", "id"), Column::field("Name", "name")];
		let document = ExportDocument {
			title: "Roadies",
			document_name: "Roadie Admin",
			scope: ExportScope::All,
			generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap(),
			columns: &columns,
			rows: records.iter().collect(),
		};
		let bytes = PdfExporter::default().export(&document).unwrap();
		String::from_utf8_lossy(&bytes).into_owned()
	}

	#[rstest]
	#[case("plain", 10, "plain")]
	#[case("Zoë", 10, "Zo?")]
	#[case("line\nbreak", 20, "line break")]
	#[case("a very long value", 8, "a ver...")]
	#[case("abcdef", 2, "ab")]
	fn test_fit(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
		assert_eq!(fit(text, max), expected);
	}

	#[rstest]
	fn test_rows_per_page() {
		let exporter = PdfExporter::default();
		assert_eq!(exporter.rows_per_page(true), 22);
		assert_eq!(exporter.rows_per_page(false), 26);
	}

	#[rstest]
	#[case(0, 1)]
	#[case(22, 1)]
	#[case(23, 2)]
	#[case(60, 3)]
	fn test_page_ranges(#[case] rows: usize, #[case] pages: usize) {
		let ranges = PdfExporter::default().page_ranges(rows);
		assert_eq!(ranges.len(), pages);
		assert_eq!(ranges.iter().map(|r| r.len()).sum::<usize>(), rows);
	}

	#[rstest]
	fn test_single_page_report() {
		let output = render(&records(3));

		assert!(output.starts_with("%PDF-"));
		assert!(output.contains("(Roadie Admin)"));
		assert!(output.contains("(Roadies)"));
		assert!(output.contains("(Generated: 2024-06-01 08:30:00 UTC)"));
		assert!(output.contains("Scope: All records"));
		assert!(output.contains("(Roadie 3)"));
		assert!(output.contains("(Page 1 of 1)"));
	}

	#[rstest]
	fn test_footer_on_every_page() {
		let output = render(&records(60));

		for page in 1..=3 {
			assert!(output.contains(&format!("(Page {} of 3)", page)));
		}
		assert!(!output.contains("(Page 4 of"));
		// Header repeated on each page
		assert_eq!(output.matches("(Name)").count(), 3);
	}
}
