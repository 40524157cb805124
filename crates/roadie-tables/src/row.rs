//! Row identity and the JSON-backed [`Record`] row type

use crate::error::{Result, TableError};
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
	/// Integer primary key
	Int(i64),
	/// String key (UUIDs, slugs, prefixed ids)
	Text(String),
}

impl RowId {
	/// Numeric key used by the default identifier sort.
	///
	/// Text ids are parsed with leading-integer semantics (`"42abc"` is 42);
	/// anything without a leading integer maps to 0.
	pub fn numeric_key(&self) -> i64 {
		match self {
			RowId::Int(n) => *n,
			RowId::Text(s) => parse_leading_int(s),
		}
	}
}

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RowId::Int(n) => write!(f, "{}", n),
			RowId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for RowId {
	fn from(value: i64) -> Self {
		RowId::Int(value)
	}
}

impl From<i32> for RowId {
	fn from(value: i32) -> Self {
		RowId::Int(i64::from(value))
	}
}

impl From<&str> for RowId {
	fn from(value: &str) -> Self {
		RowId::Text(value.to_string())
	}
}

impl From<String> for RowId {
	fn from(value: String) -> Self {
		RowId::Text(value)
	}
}

/// Parses an optional sign followed by digits at the start of `s`.
///
/// Surrounding whitespace is ignored. Returns 0 when no digits lead the
/// string or the number does not fit in an `i64`.
pub(crate) fn parse_leading_int(s: &str) -> i64 {
	let trimmed = s.trim();
	let (negative, digits) = match trimmed.as_bytes().first() {
		Some(b'-') => (true, &trimmed[1..]),
		Some(b'+') => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());
	match digits[..end].parse::<i64>() {
		Ok(n) if negative => -n,
		Ok(n) => n,
		Err(_) => 0,
	}
}

/// An entity displayed as one table line.
///
/// Only an identifier is required. Types that can look fields up by name
/// override [`Row::field`] so that [`crate::Accessor::Field`] columns work
/// against them.
pub trait Row {
	/// Returns the unique identifier of this row
	fn id(&self) -> RowId;

	/// Looks up a field by name
	///
	/// Default: [`CellValue::Null`] for every name
	fn field(&self, name: &str) -> CellValue {
		let _ = name;
		CellValue::Null
	}
}

/// A row backed by a JSON object, as returned by the admin REST API
///
/// # Example
///
/// ```rust
/// use roadie_tables::{Record, Row, RowId, CellValue};
///
/// let record = Record::try_from(serde_json::json!({
///     "id": 7,
///     "name": "Dana",
/// }))
/// .unwrap();
///
/// assert_eq!(record.id(), RowId::Int(7));
/// assert_eq!(record.field("name"), CellValue::from("Dana"));
/// assert_eq!(record.field("missing"), CellValue::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
#[serde(into = "serde_json::Map<String, serde_json::Value>")]
pub struct Record {
	id: RowId,
	fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
	/// Key holding the identifier of every record
	pub const ID_KEY: &'static str = "id";

	/// Creates a record from a JSON object.
	///
	/// The `id` entry must be an integer or a non-empty string.
	pub fn new(fields: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
		let id = match fields.get(Self::ID_KEY) {
			Some(serde_json::Value::Number(n)) => n.as_i64().map(RowId::Int).ok_or_else(|| {
				TableError::InvalidRecord(format!("id {} is not an integer", n))
			})?,
			Some(serde_json::Value::String(s)) if !s.is_empty() => RowId::Text(s.clone()),
			Some(other) => {
				return Err(TableError::InvalidRecord(format!(
					"id must be an integer or a non-empty string, got {}",
					other
				)));
			}
			None => {
				return Err(TableError::InvalidRecord(
					"record has no 'id' field".to_string(),
				));
			}
		};
		Ok(Self { id, fields })
	}

	/// Returns the underlying JSON fields
	pub fn fields(&self) -> &serde_json::Map<String, serde_json::Value> {
		&self.fields
	}

	/// Returns a raw JSON field
	pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
		self.fields.get(name)
	}
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for Record {
	type Error = TableError;

	fn try_from(fields: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
		Record::new(fields)
	}
}

impl TryFrom<serde_json::Value> for Record {
	type Error = TableError;

	fn try_from(value: serde_json::Value) -> Result<Self> {
		match value {
			serde_json::Value::Object(fields) => Record::new(fields),
			other => Err(TableError::InvalidRecord(format!(
				"expected a JSON object, got {}",
				other
			))),
		}
	}
}

impl From<Record> for serde_json::Map<String, serde_json::Value> {
	fn from(record: Record) -> Self {
		record.fields
	}
}

impl Row for Record {
	fn id(&self) -> RowId {
		self.id.clone()
	}

	fn field(&self, name: &str) -> CellValue {
		self.fields.get(name).map_or(CellValue::Null, CellValue::from)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("42", 42)]
	#[case("  17 ", 17)]
	#[case("42abc", 42)]
	#[case("-5", -5)]
	#[case("RID-0042", 0)]
	#[case("", 0)]
	#[case("99999999999999999999", 0)]
	fn test_parse_leading_int(#[case] input: &str, #[case] expected: i64) {
		assert_eq!(parse_leading_int(input), expected);
	}

	#[rstest]
	fn test_numeric_key() {
		assert_eq!(RowId::Int(9).numeric_key(), 9);
		assert_eq!(RowId::from("12").numeric_key(), 12);
		assert_eq!(RowId::from("abc").numeric_key(), 0);
	}

	#[rstest]
	fn test_record_string_id() {
		let record = Record::try_from(json!({"id": "usr_1", "email": "a@b.c"})).unwrap();
		assert_eq!(record.id(), RowId::from("usr_1"));
		assert_eq!(record.field("email"), CellValue::from("a@b.c"));
	}

	#[rstest]
	#[case(json!({"name": "no id"}))]
	#[case(json!({"id": null}))]
	#[case(json!({"id": 1.5}))]
	#[case(json!({"id": ""}))]
	#[case(json!([1, 2, 3]))]
	fn test_record_rejects_unusable_id(#[case] value: serde_json::Value) {
		let result = Record::try_from(value);
		assert!(matches!(result, Err(TableError::InvalidRecord(_))));
	}

	#[rstest]
	fn test_records_deserialize_from_api_payload() {
		// Arrange
		let payload = r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#;

		// Act
		let records: Vec<Record> = serde_json::from_str(payload).unwrap();

		// Assert
		assert_eq!(records.len(), 2);
		assert_eq!(records[1].id(), RowId::Int(2));
		assert_eq!(records[1].get("name"), Some(&json!("B")));
	}

	#[rstest]
	fn test_deserialize_rejects_record_without_id() {
		let result: std::result::Result<Vec<Record>, _> = serde_json::from_str(r#"[{"name": "A"}]"#);
		assert!(result.is_err());
	}
}
