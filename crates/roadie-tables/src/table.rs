//! The data table facade
//!
//! [`DataTable`] ties the engines together for one list screen: it owns the
//! current collection, the column set, the interaction state (sort, page,
//! search, selection, pending action) and the host callbacks. Every view is
//! derived from the collection on demand, so the table never holds a stale
//! copy of a row.

use crate::actions::{ActionResult, TableActions};
use crate::column::Column;
use crate::config::{BulkSelectionPolicy, TableConfig};
use crate::confirm::{
	ActionKind, ConfirmDialog, ConfirmGate, PendingAction, default_bulk_description,
	default_bulk_title, default_single_description, default_single_title,
};
use crate::error::{Result, TableError};
use crate::export::{self, ExportArtifact, ExportDocument, ExportFormat, ExportScope, ExportSink};
use crate::pagination::{PageWindow, Pagination};
use crate::row::{Row, RowId};
use crate::selection::Selection;
use crate::sort::{DefaultSort, SortState, sort_rows};
use crate::view::TableView;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;

/// Outcome of a delete/restore request or a confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
	/// The action is held until [`DataTable::confirm`] or [`DataTable::cancel`]
	AwaitingConfirmation,
	/// The host callback ran and returned `Ok`
	Performed,
	/// Nothing to act on: empty selection, vanished row or no pending action
	Skipped,
}

/// Generic data table over rows of type `R`
///
/// # Example
///
/// ```rust
/// use roadie_tables::{ActionStatus, Column, DataTable, Record, RowId, TableActions, TableConfig};
/// use serde_json::json;
///
/// let rows: Vec<Record> = serde_json::from_value(json!([
///     {"id": 1, "name": "Dana"},
///     {"id": 2, "name": "Eli"},
/// ]))
/// .unwrap();
///
/// let mut table = DataTable::new(vec![Column::field("Name", "name")], TableConfig::default())
///     .unwrap()
///     .with_actions(TableActions::new().on_delete(|_row: &Record| Ok(())))
///     .with_rows(rows);
///
/// let status = table.request_delete(&RowId::Int(1)).unwrap();
/// assert_eq!(status, ActionStatus::AwaitingConfirmation);
/// assert_eq!(table.confirm().unwrap(), ActionStatus::Performed);
/// ```
pub struct DataTable<R> {
	rows: Vec<R>,
	columns: Vec<Column<R>>,
	config: TableConfig,
	actions: TableActions<R>,
	sort: SortState,
	default_sort: Option<DefaultSort>,
	pagination: Pagination,
	selection: Selection,
	gate: ConfirmGate,
	// Stored lowercased
	search: String,
}

impl<R: Row> DataTable<R> {
	/// Creates an empty table
	///
	/// Fails when the configuration is invalid or its initial sort column is
	/// out of range or not sortable.
	pub fn new(columns: Vec<Column<R>>, config: TableConfig) -> Result<Self> {
		config.validate()?;
		if let Some(index) = config.initial_sort_column {
			check_sortable(&columns, index)?;
		}

		Ok(Self {
			sort: SortState::new(config.initial_sort_column, config.initial_sort_direction),
			default_sort: config.default_sort(),
			pagination: Pagination::new(config.page_size)?,
			rows: Vec::new(),
			columns,
			config,
			actions: TableActions::new(),
			selection: Selection::new(),
			gate: ConfirmGate::new(),
			search: String::new(),
		})
	}

	/// Sets the host callbacks
	pub fn with_actions(mut self, actions: TableActions<R>) -> Self {
		self.actions = actions;
		self
	}

	/// Sets the initial collection
	pub fn with_rows(mut self, rows: Vec<R>) -> Self {
		self.set_rows(rows);
		self
	}

	/// Replaces the collection with the host's current rows.
	///
	/// Selected identifiers that no longer exist are dropped and the current
	/// page is clamped into the new page range. A pending action is kept; its
	/// targets are resolved again on confirm.
	pub fn set_rows(&mut self, rows: Vec<R>) {
		self.rows = rows;
		let existing: HashSet<RowId> = self.rows.iter().map(|row| row.id()).collect();
		let pruned = self.selection.prune(&existing);
		self.sync_total();
		tracing::debug!(
			rows = self.rows.len(),
			pruned_selection = pruned,
			page = self.pagination.current_page(),
			"Collection replaced"
		);
	}

	/// Current collection in host order
	pub fn rows(&self) -> &[R] {
		&self.rows
	}

	/// Column set
	pub fn columns(&self) -> &[Column<R>] {
		&self.columns
	}

	/// Table configuration
	pub fn config(&self) -> &TableConfig {
		&self.config
	}

	/// Host callbacks
	pub fn actions(&self) -> &TableActions<R> {
		&self.actions
	}

	/// Active sort
	pub fn sort_state(&self) -> SortState {
		self.sort
	}

	/// Current selection
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	/// Current search query, lowercased
	pub fn search(&self) -> &str {
		&self.search
	}

	/// Pagination state
	pub fn pagination(&self) -> &Pagination {
		&self.pagination
	}

	/// Looks up a row of the current collection
	pub fn find_row(&self, id: &RowId) -> Option<&R> {
		self.rows.iter().find(|row| &row.id() == id)
	}

	/// Search-filtered and sorted collection, the sequence pagination and
	/// "all rows" exports work on
	pub fn ordered_rows(&self) -> Vec<&R> {
		let filtered: Vec<&R> = self.rows.iter().filter(|row| self.matches(row)).collect();
		sort_rows(&filtered, &self.columns, &self.sort, self.default_sort.as_ref())
	}

	/// Rows on the current page
	pub fn visible_rows(&self) -> Vec<&R> {
		let ordered = self.ordered_rows();
		self.pagination.slice(&ordered).to_vec()
	}

	/// Position of the current page
	pub fn page(&self) -> PageWindow {
		self.pagination.window()
	}

	/// Handles a click on the header of column `index`
	pub fn click_header(&mut self, index: usize) -> Result<()> {
		check_sortable(&self.columns, index)?;
		self.sort.click(index);
		tracing::debug!(
			column = index,
			direction = ?self.sort.direction,
			"Sort changed"
		);
		Ok(())
	}

	/// Filters the collection by a case-insensitive substring over every
	/// column's raw value. An empty query shows all rows. Changing the query
	/// returns to the first page.
	pub fn set_search(&mut self, query: &str) {
		let query = query.trim().to_lowercase();
		if query == self.search {
			return;
		}
		self.search = query;
		self.sync_total();
		self.pagination.set_page(1);
		tracing::debug!(
			query = %self.search,
			matches = self.pagination.total_items(),
			"Search changed"
		);
	}

	/// Jumps to `page`, clamped into range
	pub fn goto_page(&mut self, page: usize) {
		self.pagination.set_page(page);
	}

	/// Moves to the next page. Returns false on the last page.
	pub fn next_page(&mut self) -> bool {
		self.pagination.next_page()
	}

	/// Moves to the previous page. Returns false on the first page.
	pub fn prev_page(&mut self) -> bool {
		self.pagination.prev_page()
	}

	/// Changes the page size and returns to the first page
	pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
		self.pagination.set_per_page(page_size)?;
		tracing::debug!(page_size, "Page size changed");
		Ok(())
	}

	/// Toggles the selection of one row. Returns true when it is now selected.
	pub fn toggle_row(&mut self, id: &RowId) -> Result<bool> {
		if self.find_row(id).is_none() {
			return Err(TableError::RowNotFound(id.clone()));
		}
		Ok(self.selection.toggle(id.clone()))
	}

	/// Page-scoped select-all over the visible rows. Returns true when the
	/// page ends up selected.
	pub fn toggle_select_all(&mut self) -> bool {
		let page_ids: Vec<RowId> = self.visible_rows().iter().map(|row| row.id()).collect();
		let selected = self.selection.toggle_page(&page_ids);
		tracing::debug!(
			page = self.pagination.current_page(),
			selected,
			total_selected = self.selection.len(),
			"Toggled page selection"
		);
		selected
	}

	/// Deselects every row
	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Selected rows that still exist, in display sort order.
	///
	/// Resolution covers the whole collection, including rows hidden by the
	/// search filter or sitting on other pages.
	pub fn selected_rows(&self) -> Vec<&R> {
		self.selection.resolve(&self.selected_order())
	}

	/// Invokes the edit callback for one row. Edits are never gated.
	pub fn edit(&self, id: &RowId) -> Result<()> {
		let callback = self
			.actions
			.on_edit
			.as_ref()
			.ok_or(TableError::ActionUnavailable("on_edit"))?;
		let row = self
			.find_row(id)
			.ok_or_else(|| TableError::RowNotFound(id.clone()))?;
		finish_action("on_edit", 1, callback(row)).map(|_| ())
	}

	/// Requests deletion of one row
	pub fn request_delete(&mut self, id: &RowId) -> Result<ActionStatus> {
		self.request_single(id, ActionKind::Delete)
	}

	/// Requests restoration of one row
	pub fn request_restore(&mut self, id: &RowId) -> Result<ActionStatus> {
		self.request_single(id, ActionKind::Restore)
	}

	/// Requests deletion of the selected rows
	pub fn request_bulk_delete(&mut self) -> Result<ActionStatus> {
		self.request_bulk(ActionKind::Delete)
	}

	/// Requests restoration of the selected rows
	pub fn request_bulk_restore(&mut self) -> Result<ActionStatus> {
		self.request_bulk(ActionKind::Restore)
	}

	fn request_single(&mut self, id: &RowId, kind: ActionKind) -> Result<ActionStatus> {
		if !self.has_single_callback(kind) {
			return Err(TableError::ActionUnavailable(kind.single_action()));
		}
		if self.find_row(id).is_none() {
			return Err(TableError::RowNotFound(id.clone()));
		}

		if !self.config.confirm_action {
			return self.perform_single(id, kind);
		}

		self.gate.trigger_single(id.clone(), kind);
		tracing::debug!(id = %id, action = %kind, "Awaiting confirmation");
		Ok(ActionStatus::AwaitingConfirmation)
	}

	fn request_bulk(&mut self, kind: ActionKind) -> Result<ActionStatus> {
		if !self.has_bulk_callback(kind) {
			return Err(TableError::ActionUnavailable(kind.bulk_action()));
		}

		let ids: Vec<RowId> = self.selected_rows().iter().map(|row| row.id()).collect();
		if ids.is_empty() {
			tracing::debug!(action = %kind, "Bulk action requested with empty selection");
			return Ok(ActionStatus::Skipped);
		}

		if !self.config.confirm_action {
			return self.perform_bulk(kind);
		}

		tracing::debug!(action = %kind, rows = ids.len(), "Awaiting bulk confirmation");
		self.gate.trigger_bulk(kind, ids);
		Ok(ActionStatus::AwaitingConfirmation)
	}

	/// Confirms the pending action.
	///
	/// Targets are resolved against the current collection: a pending row that
	/// has disappeared fires nothing, and a bulk action runs on whatever is
	/// selected at confirm time. A host failure is returned as
	/// [`TableError::ActionFailed`] and never retried.
	pub fn confirm(&mut self) -> Result<ActionStatus> {
		match self.gate.take() {
			PendingAction::Idle => Ok(ActionStatus::Skipped),
			PendingAction::Single { id, kind } => self.perform_single(&id, kind),
			PendingAction::Bulk { kind, ids } => {
				let selected = self.selection.len();
				if selected != ids.len() {
					tracing::debug!(
						action = %kind,
						requested = ids.len(),
						selected,
						"Selection changed while awaiting confirmation"
					);
				}
				self.perform_bulk(kind)
			}
		}
	}

	/// Discards the pending action without invoking anything. Returns true
	/// when an action was pending.
	pub fn cancel(&mut self) -> bool {
		let was_pending = self.gate.is_pending();
		let discarded = self.gate.take();
		if was_pending {
			tracing::debug!(discarded = ?discarded, "Pending action cancelled");
		}
		was_pending
	}

	/// The pending action, if any
	pub fn pending(&self) -> &PendingAction {
		self.gate.state()
	}

	/// Dialog for the pending action
	pub fn pending_dialog(&self) -> Option<ConfirmDialog> {
		match self.gate.state() {
			PendingAction::Idle => None,
			PendingAction::Single { id, kind } => Some(self.single_dialog(id, *kind)),
			PendingAction::Bulk { kind, ids } => Some(self.bulk_dialog(*kind, ids)),
		}
	}

	/// Invokes the host-level export callback
	pub fn request_host_export(&self) -> Result<()> {
		let callback = self
			.actions
			.on_export
			.as_ref()
			.ok_or(TableError::ActionUnavailable("on_export"))?;
		finish_action("on_export", 0, callback()).map(|_| ())
	}

	/// Exports `scope` as `format` and delivers it to `sink`.
	///
	/// Returns `Ok(None)` when the scope holds no rows; nothing is delivered
	/// in that case.
	pub fn export(
		&self,
		format: ExportFormat,
		scope: ExportScope,
		sink: &mut dyn ExportSink,
	) -> Result<Option<ExportArtifact>> {
		self.export_at(format, scope, sink, Utc::now())
	}

	/// [`DataTable::export`] with an explicit generation timestamp
	pub fn export_at(
		&self,
		format: ExportFormat,
		scope: ExportScope,
		sink: &mut dyn ExportSink,
		generated_at: DateTime<Utc>,
	) -> Result<Option<ExportArtifact>> {
		let rows = match scope {
			ExportScope::All => self.ordered_rows(),
			ExportScope::Selected => self.selected_rows(),
		};
		if rows.is_empty() {
			tracing::debug!(format = ?format, scope = scope.label(), "Nothing to export");
			return Ok(None);
		}

		let row_count = rows.len();
		let document = ExportDocument {
			title: &self.config.title,
			document_name: &self.config.document_name,
			scope,
			generated_at,
			columns: &self.columns,
			rows,
		};
		let data = export::render(&document, format)?;
		let artifact =
			ExportArtifact::new(document.filename(format), format.mime_type(), data, row_count);
		sink.deliver(&artifact)?;

		tracing::info!(
			filename = %artifact.filename,
			rows = row_count,
			bytes = artifact.size_bytes(),
			"Export delivered"
		);
		Ok(Some(artifact))
	}

	/// Render model of the current state
	pub fn view(&self) -> TableView {
		TableView::build(self)
	}

	fn matches(&self, row: &R) -> bool {
		self.search.is_empty()
			|| self
				.columns
				.iter()
				.any(|column| column.raw_value(row).contains_ignore_case(&self.search))
	}

	fn sync_total(&mut self) {
		let total = self.rows.iter().filter(|row| self.matches(row)).count();
		self.pagination.set_total(total);
	}

	fn has_single_callback(&self, kind: ActionKind) -> bool {
		match kind {
			ActionKind::Delete => self.actions.on_delete.is_some(),
			ActionKind::Restore => self.actions.on_restore.is_some(),
		}
	}

	fn has_bulk_callback(&self, kind: ActionKind) -> bool {
		match kind {
			ActionKind::Delete => self.actions.on_bulk_delete.is_some(),
			ActionKind::Restore => self.actions.on_bulk_restore.is_some(),
		}
	}

	fn perform_single(&self, id: &RowId, kind: ActionKind) -> Result<ActionStatus> {
		let action = kind.single_action();
		let callback = match kind {
			ActionKind::Delete => self.actions.on_delete.as_ref(),
			ActionKind::Restore => self.actions.on_restore.as_ref(),
		}
		.ok_or(TableError::ActionUnavailable(action))?;

		let Some(row) = self.find_row(id) else {
			tracing::warn!(id = %id, action, "Target row no longer exists, nothing to do");
			return Ok(ActionStatus::Skipped);
		};

		finish_action(action, 1, callback(row))
	}

	fn perform_bulk(&mut self, kind: ActionKind) -> Result<ActionStatus> {
		let action = kind.bulk_action();
		let callback = match kind {
			ActionKind::Delete => self.actions.on_bulk_delete.as_ref(),
			ActionKind::Restore => self.actions.on_bulk_restore.as_ref(),
		}
		.ok_or(TableError::ActionUnavailable(action))?;

		let targets = self.selected_rows();
		if targets.is_empty() {
			tracing::warn!(action, "No bulk targets remain, nothing to do");
			return Ok(ActionStatus::Skipped);
		}

		let count = targets.len();
		let result = callback(&targets);
		let clear = match self.config.bulk_selection {
			BulkSelectionPolicy::ClearAlways => true,
			BulkSelectionPolicy::PreserveOnFailure => result.is_ok(),
		};
		if clear {
			self.selection.clear();
		}

		finish_action(action, count, result)
	}

	/// Whole collection in display sort order
	fn selected_order(&self) -> Vec<&R> {
		let all: Vec<&R> = self.rows.iter().collect();
		sort_rows(&all, &self.columns, &self.sort, self.default_sort.as_ref())
	}

	fn single_dialog(&self, id: &RowId, kind: ActionKind) -> ConfirmDialog {
		let (title, description) = match kind {
			ActionKind::Delete => (&self.actions.delete_title, &self.actions.delete_description),
			ActionKind::Restore => (&self.actions.restore_title, &self.actions.restore_description),
		};
		let row = self.find_row(id);

		ConfirmDialog {
			title: title
				.as_ref()
				.zip(row)
				.map(|(text, row)| text.for_row(row))
				.unwrap_or_else(|| default_single_title(kind)),
			description: description
				.as_ref()
				.zip(row)
				.map(|(text, row)| text.for_row(row))
				.unwrap_or_else(|| default_single_description(kind)),
			kind,
			target_count: usize::from(row.is_some()),
			detail: self.actions.detail.as_ref().zip(row).map(|(render, row)| render(row)),
		}
	}

	fn bulk_dialog(&self, kind: ActionKind, ids: &[RowId]) -> ConfirmDialog {
		let (title, description) = match kind {
			ActionKind::Delete => (&self.actions.delete_title, &self.actions.delete_description),
			ActionKind::Restore => (&self.actions.restore_title, &self.actions.restore_description),
		};
		let existing: HashSet<RowId> = self.rows.iter().map(|row| row.id()).collect();
		let count = ids.iter().filter(|id| existing.contains(*id)).count();

		ConfirmDialog {
			title: title
				.as_ref()
				.and_then(|text| text.for_bulk())
				.unwrap_or_else(|| default_bulk_title(kind, count)),
			description: description
				.as_ref()
				.and_then(|text| text.for_bulk())
				.unwrap_or_else(|| default_bulk_description(kind, count)),
			kind,
			target_count: count,
			detail: None,
		}
	}
}

impl<R> fmt::Debug for DataTable<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataTable")
			.field("rows", &self.rows.len())
			.field("columns", &self.columns)
			.field("sort", &self.sort)
			.field("pagination", &self.pagination)
			.field("selection", &self.selection.len())
			.field("pending", self.gate.state())
			.field("search", &self.search)
			.finish_non_exhaustive()
	}
}

fn check_sortable<R: Row>(columns: &[Column<R>], index: usize) -> Result<()> {
	let column = columns.get(index).ok_or(TableError::ColumnOutOfRange {
		index,
		count: columns.len(),
	})?;
	if !column.is_sortable() {
		return Err(TableError::ColumnNotSortable(column.header().to_string()));
	}
	Ok(())
}

/// Logs the outcome of a host callback and maps a failure into
/// [`TableError::ActionFailed`]
fn finish_action(action: &'static str, rows: usize, result: ActionResult) -> Result<ActionStatus> {
	match result {
		Ok(()) => {
			tracing::info!(action, rows, "Host action completed");
			Ok(ActionStatus::Performed)
		}
		Err(err) => {
			tracing::warn!(action, rows, error = %err, "Host action failed");
			Err(TableError::ActionFailed {
				action,
				message: err.message().to_string(),
			})
		}
	}
}
