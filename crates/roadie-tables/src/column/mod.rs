//! Column descriptors
//!
//! A column is a two-stage pipeline: the [`Accessor`] extracts the raw
//! [`crate::CellValue`] used by sorting, searching and export, and an optional
//! cell renderer projects that value into display text for the on-screen view.

pub mod accessor;
pub mod base;

pub use accessor::Accessor;
pub use base::{CellRenderer, Column};
