//! Rider roster walkthrough
//!
//! Drives a rider list the way the admin page does: rows arrive as JSON from
//! the API, the user sorts, pages, selects and deletes, and finally exports
//! the selection and the whole roster.
//!
//! Run with `cargo run -p roadie-tables --example rider_roster`.

use parking_lot::Mutex;
use roadie_tables::export::DirectorySink;
use roadie_tables::{
	ActionStatus, CellValue, Column, ConfirmText, DataTable, ExportFormat, ExportScope, Record,
	Row, RowId, TableActions, TableConfig, TableView,
};
use serde_json::json;
use std::sync::Arc;

fn print_view(view: &TableView) {
	let headers: Vec<String> = view
		.headers
		.iter()
		.map(|h| match h.sorted {
			Some(direction) => format!("{} ({:?})", h.label, direction),
			None => h.label.clone(),
		})
		.collect();
	println!("{}", headers.join(" | "));
	for row in &view.rows {
		let mark = if row.selected { "[x]" } else { "[ ]" };
		println!("{} {}", mark, row.cells.join(" | "));
	}
	println!(
		"Showing {}-{} of {} (page {} of {})\n",
		view.page.start_index,
		view.page.end_index,
		view.page.total_items,
		view.page.current_page,
		view.page.total_pages
	);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_max_level(tracing::Level::DEBUG)
		.init();

	let rows: Vec<Record> = serde_json::from_value(json!([
		{"id": 101, "name": "Amaka Obi", "phone": "+234 801 000 0101", "trips": 42, "blocked": false},
		{"id": 102, "name": "Kwame Mensah", "phone": "+233 20 000 0102", "trips": 7, "blocked": true},
		{"id": 103, "name": "Zainab Bello", "phone": null, "trips": 19, "blocked": false},
		{"id": 104, "name": "Tunde Bakare", "phone": "+234 802 000 0104", "trips": 0, "blocked": false},
		{"id": 105, "name": "Efua Asante", "phone": "+233 24 000 0105", "trips": 63, "blocked": false},
	]))?;

	let columns = vec![
		Column::field("ID", "id"),
		Column::field("Name", "name"),
		Column::field("Phone", "phone").cell(|value, _| {
			if value.is_null() {
				"-".to_string()
			} else {
				value.to_string()
			}
		}),
		Column::field("Trips", "trips"),
		Column::derived("Status", |rider: &Record| {
			let blocked = rider.get("blocked").and_then(|v| v.as_bool()).unwrap_or(false);
			CellValue::from(if blocked { "Blocked" } else { "Active" })
		}),
	];

	let config = TableConfig::from_toml(
		r#"
		title = "Rider Roster"
		page_size = 2
		default_sort_by = "id"
		"#,
	)?;

	// Stand-in for the API: the callback records deletions and the page
	// re-supplies the collection afterwards.
	let deleted: Arc<Mutex<Vec<RowId>>> = Arc::new(Mutex::new(Vec::new()));
	let deleted_by_host = Arc::clone(&deleted);
	let actions = TableActions::new()
		.on_delete(move |rider: &Record| {
			deleted_by_host.lock().push(rider.id());
			Ok(())
		})
		.on_bulk_restore(|_riders: &[&Record]| Ok(()))
		.delete_title(ConfirmText::dynamic(|rider: &Record| {
			format!("Delete {}?", rider.field("name"))
		}))
		.detail(|rider: &Record| format!("{} trips", rider.field("trips")));

	let mut table = DataTable::new(columns, config)?
		.with_actions(actions)
		.with_rows(rows.clone());

	println!("== Default order, newest first");
	print_view(&table.view());

	println!("== Sorted by trips");
	table.click_header(3)?;
	print_view(&table.view());

	println!("== Page 2, select all");
	table.next_page();
	table.toggle_select_all();
	print_view(&table.view());

	println!("== Delete rider 104");
	if table.request_delete(&RowId::Int(104))? == ActionStatus::AwaitingConfirmation {
		if let Some(dialog) = table.pending_dialog() {
			println!("{}\n{}\n{:?}", dialog.title, dialog.description, dialog.detail);
		}
	}
	table.confirm()?;

	let removed: Vec<RowId> = deleted.lock().clone();
	let remaining: Vec<Record> = rows
		.into_iter()
		.filter(|rider| !removed.contains(&rider.id()))
		.collect();
	table.set_rows(remaining);
	print_view(&table.view());

	let dir = tempfile::tempdir()?;
	let mut sink = DirectorySink::new(dir.path());
	for (format, scope) in [
		(ExportFormat::Csv, ExportScope::Selected),
		(ExportFormat::Pdf, ExportScope::All),
	] {
		match table.export(format, scope, &mut sink)? {
			Some(artifact) => println!(
				"Exported {} ({} rows, {} bytes)",
				artifact.filename,
				artifact.row_count,
				artifact.size_bytes()
			),
			None => println!("Nothing to export for {:?}", scope),
		}
	}

	Ok(())
}
