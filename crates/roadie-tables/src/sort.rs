//! Sorting functionality for tables
//!
//! Two distinct orderings exist. An explicit column sort compares the raw
//! values produced by a column's accessor. When no column is active and a
//! [`DefaultSort`] is configured, rows are ordered by a numeric identifier,
//! highest first, regardless of the stored direction.

use crate::column::Column;
use crate::row::{Row, parse_leading_int};
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[default]
	#[serde(rename = "asc")]
	Ascending,
	/// Descending order
	#[serde(rename = "desc")]
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	fn apply(&self, ordering: Ordering) -> Ordering {
		match self {
			Self::Ascending => ordering,
			Self::Descending => ordering.reverse(),
		}
	}
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
	/// Index of the sorted column, `None` when no header has been clicked
	pub column: Option<usize>,
	/// Direction of the column sort
	pub direction: SortDirection,
}

impl SortState {
	/// Creates a sort state
	pub fn new(column: Option<usize>, direction: SortDirection) -> Self {
		Self { column, direction }
	}

	/// Applies a header click on column `index`.
	///
	/// The same column toggles direction. Switching from one active column to
	/// another starts the new column descending. The first click from the
	/// unsorted state keeps the current direction.
	pub fn click(&mut self, index: usize) {
		match self.column {
			Some(current) if current == index => {
				self.direction = self.direction.toggle();
			}
			Some(_) => {
				self.column = Some(index);
				self.direction = SortDirection::Descending;
			}
			None => {
				self.column = Some(index);
			}
		}
	}
}

impl Default for SortState {
	fn default() -> Self {
		Self::new(None, SortDirection::Ascending)
	}
}

/// Identifier fallback used when no column sort is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSort {
	/// The row's own identifier
	Id,
	/// A designated external identifier field, read through [`Row::field`]
	ExternalId(String),
}

impl DefaultSort {
	/// Numeric key for `row`; unparseable values map to 0
	pub fn key<R: Row>(&self, row: &R) -> i64 {
		match self {
			DefaultSort::Id => row.id().numeric_key(),
			DefaultSort::ExternalId(field) => match row.field(field) {
				CellValue::Int(n) => n,
				CellValue::Float(n) if n.is_finite() => n.trunc() as i64,
				CellValue::Text(s) => parse_leading_int(&s),
				_ => 0,
			},
		}
	}
}

/// Orders `rows` according to `state`, falling back to `fallback` when no
/// column is active. The input is never reordered; ties keep input order.
pub fn sort_rows<'a, R: Row>(
	rows: &[&'a R],
	columns: &[Column<R>],
	state: &SortState,
	fallback: Option<&DefaultSort>,
) -> Vec<&'a R> {
	if let Some(index) = state.column {
		match columns.get(index) {
			Some(column) => return sort_by_column(rows, column, state.direction),
			None => {
				tracing::warn!(
					column = index,
					columns = columns.len(),
					"Sort column out of range, ignoring"
				);
			}
		}
	}

	match fallback {
		Some(default_sort) => sort_by_default(rows, default_sort),
		None => rows.to_vec(),
	}
}

fn sort_by_column<'a, R: Row>(
	rows: &[&'a R],
	column: &Column<R>,
	direction: SortDirection,
) -> Vec<&'a R> {
	let mut keyed: Vec<(CellValue, &'a R)> =
		rows.iter().map(|row| (column.raw_value(row), *row)).collect();

	keyed.sort_by(|(a, _), (b, _)| match (a.is_null(), b.is_null()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => direction.apply(a.compare(b)),
	});

	keyed.into_iter().map(|(_, row)| row).collect()
}

fn sort_by_default<'a, R: Row>(rows: &[&'a R], default_sort: &DefaultSort) -> Vec<&'a R> {
	let mut keyed: Vec<(i64, &'a R)> = rows
		.iter()
		.map(|row| (default_sort.key(*row), *row))
		.collect();
	keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
	keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::row::{Record, RowId};
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn records() -> Vec<Record> {
		vec![
			json!({"id": 1, "name": "Charlie", "score": 10, "ext": "R-7"}),
			json!({"id": 2, "name": "alice", "score": null, "ext": "12"}),
			json!({"id": 3, "name": "Bob", "score": 9, "ext": "3"}),
			json!({"id": 4, "name": "Alice", "score": 10, "ext": "x"}),
		]
		.into_iter()
		.map(|v| Record::try_from(v).unwrap())
		.collect()
	}

	fn columns() -> Vec<Column<Record>> {
		vec![
			Column::field("Name", "name"),
			Column::field("Score", "score"),
		]
	}

	fn ids(rows: &[&Record]) -> Vec<i64> {
		rows.iter().map(|r| r.id().numeric_key()).collect()
	}

	#[rstest]
	fn test_toggle() {
		assert_eq!(SortDirection::Ascending.toggle(), SortDirection::Descending);
		assert_eq!(SortDirection::Descending.toggle(), SortDirection::Ascending);
	}

	#[rstest]
	fn test_click_sequence() {
		let mut state = SortState::default();

		state.click(0);
		assert_eq!(state, SortState::new(Some(0), SortDirection::Ascending));

		state.click(0);
		assert_eq!(state, SortState::new(Some(0), SortDirection::Descending));

		state.click(0);
		assert_eq!(state, SortState::new(Some(0), SortDirection::Ascending));

		state.click(1);
		assert_eq!(state, SortState::new(Some(1), SortDirection::Descending));
	}

	#[rstest]
	fn test_text_sort_is_locale_independent(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		let state = SortState::new(Some(0), SortDirection::Ascending);

		let sorted = sort_rows(&rows, &columns(), &state, None);

		// Byte order: uppercase before lowercase
		assert_eq!(ids(&sorted), vec![4, 3, 1, 2]);
	}

	#[rstest]
	#[case(SortDirection::Ascending, vec![3, 1, 4, 2])]
	#[case(SortDirection::Descending, vec![1, 4, 3, 2])]
	fn test_nulls_last_in_both_directions(
		records: Vec<Record>,
		#[case] direction: SortDirection,
		#[case] expected: Vec<i64>,
	) {
		let rows: Vec<&Record> = records.iter().collect();
		let state = SortState::new(Some(1), direction);

		let sorted = sort_rows(&rows, &columns(), &state, None);

		assert_eq!(ids(&sorted), expected);
	}

	#[rstest]
	fn test_default_sort_by_id_is_descending(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		// Stored direction is ignored by the fallback
		let state = SortState::new(None, SortDirection::Ascending);

		let sorted = sort_rows(&rows, &columns(), &state, Some(&DefaultSort::Id));

		assert_eq!(ids(&sorted), vec![4, 3, 2, 1]);
	}

	#[rstest]
	fn test_default_sort_by_external_id(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		let fallback = DefaultSort::ExternalId("ext".to_string());

		let sorted = sort_rows(&rows, &columns(), &SortState::default(), Some(&fallback));

		// "12" > "3" > "R-7" (0) == "x" (0), ties keep input order
		assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
	}

	#[rstest]
	fn test_column_sort_overrides_default(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		let state = SortState::new(Some(1), SortDirection::Ascending);

		let sorted = sort_rows(&rows, &columns(), &state, Some(&DefaultSort::Id));

		assert_eq!(ids(&sorted), vec![3, 1, 4, 2]);
	}

	#[rstest]
	fn test_no_sort_keeps_input_order(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		let sorted = sort_rows(&rows, &columns(), &SortState::default(), None);
		assert_eq!(ids(&sorted), vec![1, 2, 3, 4]);
	}

	#[rstest]
	fn test_out_of_range_column_falls_back(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		let state = SortState::new(Some(9), SortDirection::Ascending);
		let sorted = sort_rows(&rows, &columns(), &state, Some(&DefaultSort::Id));
		assert_eq!(ids(&sorted), vec![4, 3, 2, 1]);
	}

	#[rstest]
	fn test_empty_collection() {
		let rows: Vec<&Record> = Vec::new();
		let state = SortState::new(Some(0), SortDirection::Descending);
		assert!(sort_rows(&rows, &columns(), &state, Some(&DefaultSort::Id)).is_empty());
	}

	#[rstest]
	fn test_sort_does_not_touch_input(records: Vec<Record>) {
		let rows: Vec<&Record> = records.iter().collect();
		let state = SortState::new(Some(0), SortDirection::Descending);
		let _ = sort_rows(&rows, &columns(), &state, None);
		assert_eq!(ids(&rows), vec![1, 2, 3, 4]);
		assert_eq!(records[0].id(), RowId::Int(1));
	}
}
