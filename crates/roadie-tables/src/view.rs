//! Render model
//!
//! [`TableView`] is a plain snapshot of everything a list screen draws: header
//! cells with their sort indicator, the visible rows with display text, the
//! select-all checkbox state, the pager, the bulk action bar and the pending
//! confirmation dialog. It holds no references into the table.

use crate::actions::Affordances;
use crate::confirm::ConfirmDialog;
use crate::export::ExportFormat;
use crate::pagination::PageWindow;
use crate::row::{Row, RowId};
use crate::sort::SortDirection;
use crate::table::DataTable;

/// Header cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
	/// Header label
	pub label: String,
	/// Whether clicking the header sorts
	pub sortable: bool,
	/// Direction indicator when this column is the active sort
	pub sorted: Option<SortDirection>,
}

/// One visible row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
	/// Row identifier
	pub id: RowId,
	/// Whether the row checkbox is checked
	pub selected: bool,
	/// Display text per column, renderers applied
	pub cells: Vec<String>,
}

/// Tri-state of the page-level select-all checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
	/// No visible row is selected
	None,
	/// Some visible rows are selected
	Partial,
	/// Every visible row is selected
	All,
}

/// Bulk action bar, present only while rows are selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBar {
	/// Number of selected rows
	pub selected_count: usize,
	/// Formats offered for "export selected"
	pub export_formats: Vec<ExportFormat>,
	/// Bulk delete button
	pub bulk_delete: bool,
	/// Bulk restore button
	pub bulk_restore: bool,
}

/// Snapshot of a table ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
	/// Header cells in column order
	pub headers: Vec<HeaderView>,
	/// Rows of the current page
	pub rows: Vec<RowView>,
	/// Select-all checkbox state for the current page
	pub select_all: SelectAllState,
	/// Pager position
	pub page: PageWindow,
	/// Current page size
	pub page_size: usize,
	/// Page sizes offered by the picker
	pub page_size_options: Vec<usize>,
	/// Active search query
	pub search: String,
	/// Bulk action bar
	pub action_bar: Option<ActionBar>,
	/// Confirmation dialog for the pending action
	pub dialog: Option<ConfirmDialog>,
	/// Enabled per-row and host affordances
	pub affordances: Affordances,
}

impl TableView {
	pub(crate) fn build<R: Row>(table: &DataTable<R>) -> Self {
		let sort = table.sort_state();
		let headers = table
			.columns()
			.iter()
			.enumerate()
			.map(|(index, column)| HeaderView {
				label: column.header().to_string(),
				sortable: column.is_sortable(),
				sorted: (sort.column == Some(index)).then_some(sort.direction),
			})
			.collect();

		let selection = table.selection();
		let rows: Vec<RowView> = table
			.visible_rows()
			.into_iter()
			.map(|row| {
				let id = row.id();
				RowView {
					selected: selection.contains(&id),
					cells: table.columns().iter().map(|c| c.display_value(row)).collect(),
					id,
				}
			})
			.collect();

		let selected_on_page = rows.iter().filter(|row| row.selected).count();
		let select_all = match selected_on_page {
			0 => SelectAllState::None,
			n if n == rows.len() => SelectAllState::All,
			_ => SelectAllState::Partial,
		};

		let affordances = table.actions().affordances();
		let action_bar = (!selection.is_empty()).then(|| ActionBar {
			selected_count: selection.len(),
			export_formats: vec![ExportFormat::Csv, ExportFormat::Pdf],
			bulk_delete: affordances.bulk_delete,
			bulk_restore: affordances.bulk_restore,
		});

		Self {
			headers,
			rows,
			select_all,
			page: table.page(),
			page_size: table.pagination().per_page(),
			page_size_options: table.config().page_size_options.clone(),
			search: table.search().to_string(),
			action_bar,
			dialog: table.pending_dialog(),
			affordances,
		}
	}

	/// Returns true when the current page shows no rows
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}
