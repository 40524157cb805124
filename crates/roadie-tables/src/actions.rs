//! Host-supplied action callbacks
//!
//! The table never performs a mutation itself. Each callback receives the
//! row(s) the user acted on; the host performs the API call, surfaces any
//! failure, and re-supplies the collection. A host whose work is asynchronous
//! spawns it and returns `Ok(())`.

use crate::confirm::ConfirmText;
use std::fmt;
use thiserror::Error;

/// Failure reported by a host callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
	message: String,
}

impl ActionError {
	/// Creates an action error
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the host's message
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Result of a host callback
pub type ActionResult = std::result::Result<(), ActionError>;

/// Callback acting on one row
pub type RowCallback<R> = Box<dyn Fn(&R) -> ActionResult + Send + Sync>;

/// Callback acting on the resolved selection
pub type BulkCallback<R> = Box<dyn Fn(&[&R]) -> ActionResult + Send + Sync>;

/// Callback for the host-level export affordance
pub type ExportCallback = Box<dyn Fn() -> ActionResult + Send + Sync>;

/// Renders the detail block shown in single-row confirmation dialogs
pub type DetailRenderer<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// Which affordances the host enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affordances {
	/// Per-row edit button
	pub edit: bool,
	/// Per-row delete button
	pub delete: bool,
	/// Per-row restore button
	pub restore: bool,
	/// Bulk delete in the action bar
	pub bulk_delete: bool,
	/// Bulk restore in the action bar
	pub bulk_restore: bool,
	/// Host export button
	pub export: bool,
}

/// Callbacks and confirmation texts supplied by the hosting page
///
/// # Example
///
/// ```rust
/// use roadie_tables::{ConfirmText, Record, TableActions};
///
/// let actions = TableActions::<Record>::new()
///     .on_delete(|_rider| Ok(()))
///     .delete_title(ConfirmText::Static("Delete rider?".to_string()));
///
/// assert!(actions.affordances().delete);
/// assert!(!actions.affordances().bulk_delete);
/// ```
pub struct TableActions<R> {
	pub(crate) on_edit: Option<RowCallback<R>>,
	pub(crate) on_delete: Option<RowCallback<R>>,
	pub(crate) on_restore: Option<RowCallback<R>>,
	pub(crate) on_bulk_delete: Option<BulkCallback<R>>,
	pub(crate) on_bulk_restore: Option<BulkCallback<R>>,
	pub(crate) on_export: Option<ExportCallback>,
	pub(crate) delete_title: Option<ConfirmText<R>>,
	pub(crate) delete_description: Option<ConfirmText<R>>,
	pub(crate) restore_title: Option<ConfirmText<R>>,
	pub(crate) restore_description: Option<ConfirmText<R>>,
	pub(crate) detail: Option<DetailRenderer<R>>,
}

impl<R> TableActions<R> {
	/// Creates an empty set of actions: every affordance disabled
	pub fn new() -> Self {
		Self {
			on_edit: None,
			on_delete: None,
			on_restore: None,
			on_bulk_delete: None,
			on_bulk_restore: None,
			on_export: None,
			delete_title: None,
			delete_description: None,
			restore_title: None,
			restore_description: None,
			detail: None,
		}
	}

	/// Sets the edit callback
	pub fn on_edit<F>(mut self, f: F) -> Self
	where
		F: Fn(&R) -> ActionResult + Send + Sync + 'static,
	{
		self.on_edit = Some(Box::new(f));
		self
	}

	/// Sets the single-row delete callback
	pub fn on_delete<F>(mut self, f: F) -> Self
	where
		F: Fn(&R) -> ActionResult + Send + Sync + 'static,
	{
		self.on_delete = Some(Box::new(f));
		self
	}

	/// Sets the single-row restore callback
	pub fn on_restore<F>(mut self, f: F) -> Self
	where
		F: Fn(&R) -> ActionResult + Send + Sync + 'static,
	{
		self.on_restore = Some(Box::new(f));
		self
	}

	/// Sets the bulk delete callback
	pub fn on_bulk_delete<F>(mut self, f: F) -> Self
	where
		F: Fn(&[&R]) -> ActionResult + Send + Sync + 'static,
	{
		self.on_bulk_delete = Some(Box::new(f));
		self
	}

	/// Sets the bulk restore callback
	pub fn on_bulk_restore<F>(mut self, f: F) -> Self
	where
		F: Fn(&[&R]) -> ActionResult + Send + Sync + 'static,
	{
		self.on_bulk_restore = Some(Box::new(f));
		self
	}

	/// Sets the host export callback
	pub fn on_export<F>(mut self, f: F) -> Self
	where
		F: Fn() -> ActionResult + Send + Sync + 'static,
	{
		self.on_export = Some(Box::new(f));
		self
	}

	/// Sets the delete confirmation title
	pub fn delete_title(mut self, text: ConfirmText<R>) -> Self {
		self.delete_title = Some(text);
		self
	}

	/// Sets the delete confirmation description
	pub fn delete_description(mut self, text: ConfirmText<R>) -> Self {
		self.delete_description = Some(text);
		self
	}

	/// Sets the restore confirmation title
	pub fn restore_title(mut self, text: ConfirmText<R>) -> Self {
		self.restore_title = Some(text);
		self
	}

	/// Sets the restore confirmation description
	pub fn restore_description(mut self, text: ConfirmText<R>) -> Self {
		self.restore_description = Some(text);
		self
	}

	/// Sets the detail renderer for single-row confirmation dialogs
	pub fn detail<F>(mut self, f: F) -> Self
	where
		F: Fn(&R) -> String + Send + Sync + 'static,
	{
		self.detail = Some(Box::new(f));
		self
	}

	/// Reports which affordances are enabled
	pub fn affordances(&self) -> Affordances {
		Affordances {
			edit: self.on_edit.is_some(),
			delete: self.on_delete.is_some(),
			restore: self.on_restore.is_some(),
			bulk_delete: self.on_bulk_delete.is_some(),
			bulk_restore: self.on_bulk_restore.is_some(),
			export: self.on_export.is_some(),
		}
	}
}

impl<R> Default for TableActions<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> fmt::Debug for TableActions<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableActions")
			.field("affordances", &self.affordances())
			.finish_non_exhaustive()
	}
}
