//! Pagination functionality for tables

use crate::error::{Result, TableError};
use std::ops::Range;

/// Pagination configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
	/// Number of items per page
	per_page: usize,
	/// Current page number (1-indexed)
	current_page: usize,
	/// Total number of items
	total_items: usize,
}

/// Position of the visible page within the ordered collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
	/// Current page number (1-indexed)
	pub current_page: usize,
	/// Total number of pages, at least 1
	pub total_pages: usize,
	/// 1-based index of the first visible item, 0 when empty
	pub start_index: usize,
	/// 1-based index of the last visible item, 0 when empty
	pub end_index: usize,
	/// Total number of items across all pages
	pub total_items: usize,
	/// 0-based slice range of the visible items
	pub range: Range<usize>,
}

impl PageWindow {
	/// Returns true when a previous page exists
	pub fn has_previous(&self) -> bool {
		self.current_page > 1
	}

	/// Returns true when a next page exists
	pub fn has_next(&self) -> bool {
		self.current_page < self.total_pages
	}
}

impl Pagination {
	/// Creates a new pagination configuration
	///
	/// # Arguments
	///
	/// * `per_page` - Number of items per page, at least 1
	pub fn new(per_page: usize) -> Result<Self> {
		if per_page == 0 {
			return Err(TableError::InvalidPageSize(per_page));
		}
		Ok(Self {
			per_page,
			current_page: 1,
			total_items: 0,
		})
	}

	/// Returns the number of items per page
	pub fn per_page(&self) -> usize {
		self.per_page
	}

	/// Returns the current page number (1-indexed)
	pub fn current_page(&self) -> usize {
		self.current_page
	}

	/// Returns the total number of items
	pub fn total_items(&self) -> usize {
		self.total_items
	}

	/// Returns the total number of pages
	///
	/// An empty collection still has one (empty) page.
	pub fn total_pages(&self) -> usize {
		self.total_items.div_ceil(self.per_page).max(1)
	}

	/// Returns the start index for the current page (0-indexed)
	pub fn start_index(&self) -> usize {
		(self.current_page.saturating_sub(1) * self.per_page).min(self.total_items)
	}

	/// Returns the end index for the current page (exclusive, 0-indexed)
	pub fn end_index(&self) -> usize {
		(self.start_index() + self.per_page).min(self.total_items)
	}

	/// Updates the item count and clamps the current page into range.
	///
	/// Returns true when the current page had to move.
	pub fn set_total(&mut self, total_items: usize) -> bool {
		self.total_items = total_items;
		let clamped = self.current_page.clamp(1, self.total_pages());
		let moved = clamped != self.current_page;
		if moved {
			tracing::debug!(
				from = self.current_page,
				to = clamped,
				total_items,
				"Clamped current page after collection changed"
			);
			self.current_page = clamped;
		}
		moved
	}

	/// Changes the page size and returns to the first page
	pub fn set_per_page(&mut self, per_page: usize) -> Result<()> {
		if per_page == 0 {
			return Err(TableError::InvalidPageSize(per_page));
		}
		self.per_page = per_page;
		self.current_page = 1;
		Ok(())
	}

	/// Moves to the next page if available
	pub fn next_page(&mut self) -> bool {
		if self.current_page < self.total_pages() {
			self.current_page += 1;
			true
		} else {
			false
		}
	}

	/// Moves to the previous page if available
	pub fn prev_page(&mut self) -> bool {
		if self.current_page > 1 {
			self.current_page -= 1;
			true
		} else {
			false
		}
	}

	/// Sets the current page, clamped to `[1, total_pages]`
	pub fn set_page(&mut self, page: usize) {
		self.current_page = page.clamp(1, self.total_pages());
	}

	/// Describes the visible page
	pub fn window(&self) -> PageWindow {
		let range = self.start_index()..self.end_index();
		let (start_index, end_index) = if range.is_empty() {
			(0, 0)
		} else {
			(range.start + 1, range.end)
		};
		PageWindow {
			current_page: self.current_page,
			total_pages: self.total_pages(),
			start_index,
			end_index,
			total_items: self.total_items,
			range,
		}
	}

	/// Returns the visible slice of `items`
	///
	/// `items` is expected to hold `total_items` elements; shorter slices are
	/// cut at their end.
	pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
		let start = self.start_index().min(items.len());
		let end = self.end_index().min(items.len());
		&items[start..end]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn pagination(per_page: usize, total: usize) -> Pagination {
		let mut pagination = Pagination::new(per_page).unwrap();
		pagination.set_total(total);
		pagination
	}

	#[rstest]
	#[case(10, 0, 1)]
	#[case(10, 1, 1)]
	#[case(10, 10, 1)]
	#[case(10, 11, 2)]
	#[case(2, 3, 2)]
	#[case(1, 5, 5)]
	fn test_total_pages(#[case] per_page: usize, #[case] total: usize, #[case] expected: usize) {
		assert_eq!(pagination(per_page, total).total_pages(), expected);
	}

	#[rstest]
	fn test_zero_page_size_rejected() {
		assert!(matches!(Pagination::new(0), Err(TableError::InvalidPageSize(0))));
		let mut p = pagination(10, 5);
		assert!(p.set_per_page(0).is_err());
		assert_eq!(p.per_page(), 10);
	}

	#[rstest]
	fn test_window_indices() {
		let mut p = pagination(10, 25);
		p.set_page(3);

		let window = p.window();

		assert_eq!(window.current_page, 3);
		assert_eq!(window.total_pages, 3);
		assert_eq!(window.start_index, 21);
		assert_eq!(window.end_index, 25);
		assert_eq!(window.range, 20..25);
		assert!(window.has_previous());
		assert!(!window.has_next());
	}

	#[rstest]
	fn test_empty_window() {
		let window = pagination(10, 0).window();
		assert_eq!(window.current_page, 1);
		assert_eq!(window.total_pages, 1);
		assert_eq!(window.start_index, 0);
		assert_eq!(window.end_index, 0);
		assert!(window.range.is_empty());
	}

	#[rstest]
	fn test_navigation_is_clamped() {
		let mut p = pagination(2, 3);

		assert!(!p.prev_page());
		assert_eq!(p.current_page(), 1);
		assert!(p.next_page());
		assert!(!p.next_page());
		assert_eq!(p.current_page(), 2);

		p.set_page(0);
		assert_eq!(p.current_page(), 1);
		p.set_page(99);
		assert_eq!(p.current_page(), 2);
	}

	#[rstest]
	fn test_shrinking_collection_clamps_page() {
		// Arrange
		let mut p = pagination(2, 5);
		p.set_page(3);

		// Act
		let moved = p.set_total(4);

		// Assert
		assert!(moved);
		assert_eq!(p.current_page(), 2);
		assert_eq!(p.window().range, 2..4);
	}

	#[rstest]
	fn test_page_size_change_resets_to_first_page() {
		let mut p = pagination(2, 10);
		p.set_page(4);

		p.set_per_page(5).unwrap();

		assert_eq!(p.current_page(), 1);
		assert_eq!(p.total_pages(), 2);
	}

	#[rstest]
	fn test_slice() {
		let items: Vec<i32> = (1..=5).collect();
		let mut p = pagination(2, items.len());
		assert_eq!(p.slice(&items), &[1, 2]);
		p.set_page(3);
		assert_eq!(p.slice(&items), &[5]);
	}
}
