//! Raw value extraction

use crate::row::Row;
use crate::value::CellValue;
use std::fmt::{self, Debug};

/// Function computing a raw value from a row
pub type DerivedFn<R> = Box<dyn Fn(&R) -> CellValue + Send + Sync>;

/// How a column reads its raw value from a row
pub enum Accessor<R> {
	/// Static field lookup through [`Row::field`]
	Field(String),
	/// Computed value
	Derived(DerivedFn<R>),
}

impl<R: Row> Accessor<R> {
	/// Creates a field accessor
	pub fn field(name: impl Into<String>) -> Self {
		Accessor::Field(name.into())
	}

	/// Creates a derived accessor
	pub fn derived<F>(f: F) -> Self
	where
		F: Fn(&R) -> CellValue + Send + Sync + 'static,
	{
		Accessor::Derived(Box::new(f))
	}

	/// Resolves the raw value for `row`
	pub fn resolve(&self, row: &R) -> CellValue {
		match self {
			Accessor::Field(name) => row.field(name),
			Accessor::Derived(f) => f(row),
		}
	}

	/// Returns the field name for field accessors
	pub fn field_name(&self) -> Option<&str> {
		match self {
			Accessor::Field(name) => Some(name),
			Accessor::Derived(_) => None,
		}
	}
}

impl<R> Debug for Accessor<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
			Accessor::Derived(_) => f.write_str("Derived(..)"),
		}
	}
}
