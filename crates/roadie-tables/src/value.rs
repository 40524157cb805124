//! Raw cell values
//!
//! A [`CellValue`] is what a column accessor extracts from a row before any
//! display formatting. Sorting, searching and every export format work on
//! these values; only the on-screen view applies cell renderers.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A raw value extracted from a row by a column accessor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
	/// Missing value. Exported as an empty string and sorted last.
	Null,
	/// Boolean flag
	Bool(bool),
	/// Integer number
	Int(i64),
	/// Floating point number
	Float(f64),
	/// Free text
	Text(String),
}

impl CellValue {
	/// Returns true for [`CellValue::Null`]
	pub fn is_null(&self) -> bool {
		matches!(self, CellValue::Null)
	}

	/// Returns the numeric value for `Int` and `Float`
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			CellValue::Int(n) => Some(*n as f64),
			CellValue::Float(n) => Some(*n),
			_ => None,
		}
	}

	/// Compares two non-null values.
	///
	/// Numbers compare numerically, text and booleans by their natural order,
	/// and mixed kinds by their exported text. Null handling is left to the
	/// caller since nulls sort last in both directions.
	pub fn compare(&self, other: &CellValue) -> Ordering {
		if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
			return a.total_cmp(&b);
		}
		match (self, other) {
			(CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
			(CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
			_ => self.to_string().cmp(&other.to_string()),
		}
	}

	/// Case-insensitive substring match used by the search filter
	pub fn contains_ignore_case(&self, needle_lowercase: &str) -> bool {
		match self {
			CellValue::Null => false,
			other => other.to_string().to_lowercase().contains(needle_lowercase),
		}
	}
}

impl fmt::Display for CellValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CellValue::Null => Ok(()),
			CellValue::Bool(b) => write!(f, "{}", b),
			CellValue::Int(n) => write!(f, "{}", n),
			CellValue::Float(n) => write!(f, "{}", n),
			CellValue::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for CellValue {
	fn from(value: &str) -> Self {
		CellValue::Text(value.to_string())
	}
}

impl From<String> for CellValue {
	fn from(value: String) -> Self {
		CellValue::Text(value)
	}
}

impl From<&String> for CellValue {
	fn from(value: &String) -> Self {
		CellValue::Text(value.clone())
	}
}

impl From<bool> for CellValue {
	fn from(value: bool) -> Self {
		CellValue::Bool(value)
	}
}

impl From<i64> for CellValue {
	fn from(value: i64) -> Self {
		CellValue::Int(value)
	}
}

impl From<i32> for CellValue {
	fn from(value: i32) -> Self {
		CellValue::Int(i64::from(value))
	}
}

impl From<u32> for CellValue {
	fn from(value: u32) -> Self {
		CellValue::Int(i64::from(value))
	}
}

impl From<u64> for CellValue {
	fn from(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(n) => CellValue::Int(n),
			Err(_) => CellValue::Float(value as f64),
		}
	}
}

impl From<f64> for CellValue {
	fn from(value: f64) -> Self {
		CellValue::Float(value)
	}
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(CellValue::Null, Into::into)
	}
}

impl From<&serde_json::Value> for CellValue {
	fn from(value: &serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => CellValue::Null,
			serde_json::Value::Bool(b) => CellValue::Bool(*b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => CellValue::Int(i),
				None => n.as_f64().map_or(CellValue::Null, CellValue::Float),
			},
			serde_json::Value::String(s) => CellValue::Text(s.clone()),
			other => CellValue::Text(other.to_string()),
		}
	}
}
