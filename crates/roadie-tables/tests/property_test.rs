use proptest::prelude::*;
use roadie_tables::sort::{DefaultSort, sort_rows};
use roadie_tables::{Column, Pagination, Record, Row, RowId, Selection, SortDirection, SortState};
use serde_json::json;
use std::collections::HashSet;

fn records(scores: &[Option<i64>]) -> Vec<Record> {
	scores
		.iter()
		.enumerate()
		.map(|(i, score)| Record::try_from(json!({"id": i as i64 + 1, "score": score})).unwrap())
		.collect()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(50))]

	/// Test: Pages partition the collection
	///
	/// Category: Property
	/// Verifies that walking every page visits each item exactly once, in order.
	#[test]
	fn prop_pages_partition_collection(total in 0usize..200, per_page in 1usize..30) {
		let items: Vec<usize> = (0..total).collect();
		let mut pagination = Pagination::new(per_page).unwrap();
		pagination.set_total(total);

		let mut seen = Vec::new();
		for page in 1..=pagination.total_pages() {
			pagination.set_page(page);
			let window = pagination.window();
			prop_assert!(window.range.len() <= per_page);
			seen.extend_from_slice(pagination.slice(&items));
		}

		prop_assert_eq!(seen, items);
		prop_assert!(pagination.total_pages() >= 1);
	}

	/// Test: Current page stays in range
	///
	/// Category: Property
	/// Verifies that any navigation leaves the page within `[1, total_pages]`.
	#[test]
	fn prop_current_page_in_range(
		total in 0usize..100,
		shrink_to in 0usize..100,
		per_page in 1usize..10,
		target in 0usize..50
	) {
		let mut pagination = Pagination::new(per_page).unwrap();
		pagination.set_total(total);
		pagination.set_page(target);
		pagination.set_total(shrink_to);

		prop_assert!(pagination.current_page() >= 1);
		prop_assert!(pagination.current_page() <= pagination.total_pages());
	}

	/// Test: Column sort is idempotent and keeps nulls last
	///
	/// Category: Property
	/// Verifies that sorting an already sorted sequence changes nothing.
	#[test]
	fn prop_sort_idempotent(
		scores in prop::collection::vec(prop::option::of(-50i64..50), 0..40),
		descending in any::<bool>()
	) {
		let records = records(&scores);
		let rows: Vec<&Record> = records.iter().collect();
		let columns = vec![Column::field("Score", "score")];
		let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
		let state = SortState::new(Some(0), direction);

		let once = sort_rows(&rows, &columns, &state, None);
		let twice = sort_rows(&once, &columns, &state, None);

		let ids = |rows: &[&Record]| rows.iter().map(|r| r.id()).collect::<Vec<RowId>>();
		prop_assert_eq!(ids(&once), ids(&twice));
		prop_assert_eq!(once.len(), rows.len());

		let first_null = once.iter().position(|r| r.field("score").is_null()).unwrap_or(once.len());
		prop_assert!(once[first_null..].iter().all(|r| r.field("score").is_null()));
	}

	/// Test: Default sort is descending by id
	///
	/// Category: Property
	/// Verifies the identifier fallback for any input order.
	#[test]
	fn prop_default_sort_descending(ids in prop::collection::hash_set(0i64..1000, 0..30)) {
		let records: Vec<Record> = ids
			.iter()
			.map(|id| Record::try_from(json!({"id": id})).unwrap())
			.collect();
		let rows: Vec<&Record> = records.iter().collect();

		let sorted = sort_rows(&rows, &[], &SortState::default(), Some(&DefaultSort::Id));

		let keys: Vec<i64> = sorted.iter().map(|r| r.id().numeric_key()).collect();
		prop_assert!(keys.windows(2).all(|w| w[0] >= w[1]));
	}

	/// Test: Page select-all never touches other pages
	///
	/// Category: Property
	/// Verifies that toggling one page leaves every id outside it unchanged.
	#[test]
	fn prop_select_all_page_scoped(
		preselected in prop::collection::hash_set(0i64..40, 0..20),
		page_start in 0i64..30,
		page_len in 0i64..10
	) {
		let mut selection = Selection::new();
		for id in &preselected {
			selection.toggle(RowId::Int(*id));
		}
		let page: Vec<RowId> = (page_start..page_start + page_len).map(RowId::Int).collect();
		let on_page: HashSet<RowId> = page.iter().cloned().collect();

		selection.toggle_page(&page);

		for id in 0..40 {
			let id = RowId::Int(id);
			if !on_page.contains(&id) {
				prop_assert_eq!(selection.contains(&id), preselected.contains(&id.numeric_key()));
			}
		}
	}
}
