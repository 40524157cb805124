//! Row selection
//!
//! The selection holds row identifiers, never row copies. Identifiers whose
//! rows have left the collection stay inert until the next reconciliation
//! prunes them, and are skipped whenever the selection is resolved.

use crate::row::{Row, RowId};
use std::collections::HashSet;

/// Set of selected row identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
	ids: HashSet<RowId>,
}

impl Selection {
	/// Creates an empty selection
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or removes `id`. Returns true when the id is now selected.
	pub fn toggle(&mut self, id: RowId) -> bool {
		if self.ids.remove(&id) {
			false
		} else {
			self.ids.insert(id);
			true
		}
	}

	/// Returns true when `id` is selected
	pub fn contains(&self, id: &RowId) -> bool {
		self.ids.contains(id)
	}

	/// Number of selected identifiers, stale ones included
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// Returns true when nothing is selected
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Deselects everything
	pub fn clear(&mut self) {
		self.ids.clear();
	}

	/// Iterates over the selected identifiers in no particular order
	pub fn iter(&self) -> impl Iterator<Item = &RowId> {
		self.ids.iter()
	}

	/// Returns true when every id in `page_ids` is selected and the page is
	/// not empty
	pub fn is_page_selected(&self, page_ids: &[RowId]) -> bool {
		!page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id))
	}

	/// Page-scoped select-all.
	///
	/// A fully selected page is deselected; otherwise every id on the page is
	/// added. Selections on other pages are never touched. Returns true when
	/// the page ends up selected.
	pub fn toggle_page(&mut self, page_ids: &[RowId]) -> bool {
		if page_ids.is_empty() {
			return false;
		}
		if self.is_page_selected(page_ids) {
			for id in page_ids {
				self.ids.remove(id);
			}
			false
		} else {
			self.ids.extend(page_ids.iter().cloned());
			true
		}
	}

	/// Drops identifiers that are not in `existing`. Returns how many were
	/// dropped.
	pub fn prune(&mut self, existing: &HashSet<RowId>) -> usize {
		let before = self.ids.len();
		self.ids.retain(|id| existing.contains(id));
		before - self.ids.len()
	}

	/// Resolves the selection against the current collection.
	///
	/// Rows come back in the order of `rows`; stale identifiers resolve to
	/// nothing.
	pub fn resolve<'a, R: Row>(&self, rows: &[&'a R]) -> Vec<&'a R> {
		if self.ids.is_empty() {
			return Vec::new();
		}
		rows.iter()
			.filter(|row| self.ids.contains(&row.id()))
			.copied()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::row::Record;
	use rstest::rstest;
	use serde_json::json;

	fn ids(values: &[i64]) -> Vec<RowId> {
		values.iter().map(|v| RowId::Int(*v)).collect()
	}

	#[rstest]
	fn test_toggle() {
		let mut selection = Selection::new();
		assert!(selection.toggle(RowId::Int(1)));
		assert!(selection.contains(&RowId::Int(1)));
		assert!(!selection.toggle(RowId::Int(1)));
		assert!(selection.is_empty());
	}

	#[rstest]
	fn test_toggle_page_adds_partial_page() {
		let mut selection = Selection::new();
		selection.toggle(RowId::Int(3));

		let selected = selection.toggle_page(&ids(&[3, 4]));

		assert!(selected);
		assert_eq!(selection.len(), 2);
	}

	#[rstest]
	fn test_toggle_page_keeps_other_pages() {
		// Arrange: row 1 selected on page one
		let mut selection = Selection::new();
		selection.toggle(RowId::Int(1));
		let page_two = ids(&[3, 4]);

		// Act: select then deselect all of page two
		selection.toggle_page(&page_two);
		selection.toggle_page(&page_two);

		// Assert
		assert!(selection.contains(&RowId::Int(1)));
		assert_eq!(selection.len(), 1);
	}

	#[rstest]
	fn test_toggle_empty_page_is_noop() {
		let mut selection = Selection::new();
		assert!(!selection.toggle_page(&[]));
		assert!(!selection.is_page_selected(&[]));
	}

	#[rstest]
	fn test_prune() {
		let mut selection = Selection::new();
		for id in ids(&[1, 2, 3]) {
			selection.toggle(id);
		}
		let existing: HashSet<RowId> = ids(&[2, 3, 4]).into_iter().collect();

		let dropped = selection.prune(&existing);

		assert_eq!(dropped, 1);
		assert!(!selection.contains(&RowId::Int(1)));
	}

	#[rstest]
	fn test_resolve_skips_stale_and_follows_row_order() {
		let records: Vec<Record> = [1, 2, 3]
			.into_iter()
			.map(|id| Record::try_from(json!({"id": id})).unwrap())
			.collect();
		let rows: Vec<&Record> = records.iter().rev().collect();
		let mut selection = Selection::new();
		for id in ids(&[1, 3, 99]) {
			selection.toggle(id);
		}

		let resolved = selection.resolve(&rows);

		let resolved_ids: Vec<RowId> = resolved.iter().map(|r| r.id()).collect();
		assert_eq!(resolved_ids, ids(&[3, 1]));
	}
}
