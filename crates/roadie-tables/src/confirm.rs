//! Pending-action gate
//!
//! Delete and restore actions, single or bulk, pass through one state
//! machine:
//!
//! ```text
//! Idle ──trigger──> PendingSingle / PendingBulk ──confirm | cancel──> Idle
//! ```
//!
//! At most one action is pending. A new trigger replaces the previous one.
//! The pending action records identifiers only; rows are looked up again from
//! the current collection when the user confirms.

use crate::row::RowId;
use std::fmt;

/// Kind of gated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
	/// Delete (soft or hard, as the host decides)
	Delete,
	/// Restore a previously deleted entity
	Restore,
}

impl ActionKind {
	/// Lowercase verb used in messages and logs
	pub fn verb(&self) -> &'static str {
		match self {
			ActionKind::Delete => "delete",
			ActionKind::Restore => "restore",
		}
	}

	/// Callback name for the single-row variant
	pub(crate) fn single_action(&self) -> &'static str {
		match self {
			ActionKind::Delete => "on_delete",
			ActionKind::Restore => "on_restore",
		}
	}

	/// Callback name for the bulk variant
	pub(crate) fn bulk_action(&self) -> &'static str {
		match self {
			ActionKind::Delete => "on_bulk_delete",
			ActionKind::Restore => "on_bulk_restore",
		}
	}
}

impl fmt::Display for ActionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.verb())
	}
}

/// Confirmation title or description
pub enum ConfirmText<R> {
	/// Same text for every row
	Static(String),
	/// Text computed from the target row. Bulk dialogs, which have no single
	/// row, fall back to the default text.
	Dynamic(Box<dyn Fn(&R) -> String + Send + Sync>),
}

impl<R> ConfirmText<R> {
	/// Creates a dynamic text
	pub fn dynamic<F>(f: F) -> Self
	where
		F: Fn(&R) -> String + Send + Sync + 'static,
	{
		ConfirmText::Dynamic(Box::new(f))
	}

	pub(crate) fn for_row(&self, row: &R) -> String {
		match self {
			ConfirmText::Static(text) => text.clone(),
			ConfirmText::Dynamic(f) => f(row),
		}
	}

	pub(crate) fn for_bulk(&self) -> Option<String> {
		match self {
			ConfirmText::Static(text) => Some(text.clone()),
			ConfirmText::Dynamic(_) => None,
		}
	}
}

impl<R> fmt::Debug for ConfirmText<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfirmText::Static(text) => f.debug_tuple("Static").field(text).finish(),
			ConfirmText::Dynamic(_) => f.write_str("Dynamic(..)"),
		}
	}
}

impl<R> From<&str> for ConfirmText<R> {
	fn from(text: &str) -> Self {
		ConfirmText::Static(text.to_string())
	}
}

/// Action awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
	/// Nothing pending
	Idle,
	/// One row awaiting delete/restore
	Single {
		/// Target row
		id: RowId,
		/// Requested action
		kind: ActionKind,
	},
	/// The selection awaiting bulk delete/restore
	Bulk {
		/// Requested action
		kind: ActionKind,
		/// Selection at trigger time, used to size the dialog
		ids: Vec<RowId>,
	},
}

/// Single pending-action state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmGate {
	state: PendingAction,
}

impl ConfirmGate {
	/// Creates an idle gate
	pub fn new() -> Self {
		Self {
			state: PendingAction::Idle,
		}
	}

	/// Returns the current state
	pub fn state(&self) -> &PendingAction {
		&self.state
	}

	/// Returns true when an action awaits confirmation
	pub fn is_pending(&self) -> bool {
		!matches!(self.state, PendingAction::Idle)
	}

	/// Holds a single-row action
	pub fn trigger_single(&mut self, id: RowId, kind: ActionKind) {
		self.replace(PendingAction::Single { id, kind });
	}

	/// Holds a bulk action
	pub fn trigger_bulk(&mut self, kind: ActionKind, ids: Vec<RowId>) {
		self.replace(PendingAction::Bulk { kind, ids });
	}

	/// Takes the pending action and returns to idle
	pub fn take(&mut self) -> PendingAction {
		std::mem::replace(&mut self.state, PendingAction::Idle)
	}

	fn replace(&mut self, next: PendingAction) {
		if self.is_pending() {
			tracing::debug!(previous = ?self.state, "Replacing pending action");
		}
		self.state = next;
	}
}

impl Default for ConfirmGate {
	fn default() -> Self {
		Self::new()
	}
}

/// Confirmation dialog shown while an action is pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
	/// Dialog title
	pub title: String,
	/// Dialog body
	pub description: String,
	/// Requested action
	pub kind: ActionKind,
	/// Number of rows the action will apply to
	pub target_count: usize,
	/// Caller-rendered details of the target row (single-row actions only)
	pub detail: Option<String>,
}

pub(crate) fn default_single_title(kind: ActionKind) -> String {
	match kind {
		ActionKind::Delete => "Delete item?".to_string(),
		ActionKind::Restore => "Restore item?".to_string(),
	}
}

pub(crate) fn default_single_description(kind: ActionKind) -> String {
	match kind {
		ActionKind::Delete => {
			"Are you sure you want to delete this item? This action cannot be undone.".to_string()
		}
		ActionKind::Restore => "Are you sure you want to restore this item?".to_string(),
	}
}

pub(crate) fn default_bulk_title(kind: ActionKind, count: usize) -> String {
	let noun = if count == 1 { "item" } else { "items" };
	match kind {
		ActionKind::Delete => format!("Delete {} {}?", count, noun),
		ActionKind::Restore => format!("Restore {} {}?", count, noun),
	}
}

pub(crate) fn default_bulk_description(kind: ActionKind, count: usize) -> String {
	let noun = if count == 1 { "item" } else { "items" };
	match kind {
		ActionKind::Delete => format!(
			"Are you sure you want to delete {} selected {}? This action cannot be undone.",
			count, noun
		),
		ActionKind::Restore => format!(
			"Are you sure you want to restore {} selected {}?",
			count, noun
		),
	}
}
