// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bqpod_type::{Error, Value};
use serde::{Serialize, Serializer, ser};
use serde_json::Value as JsonValue;

use crate::schema::Schema;

mod column;

pub use column::Column;

/// One result record: values in schema order, paired with the schema.
///
/// Construction never fails; whether each value fits its column is decided
/// when the row is encoded. Missing trailing values are null and values past
/// the last column are dropped, so a row is always as wide as its schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
	schema: Schema,
	values: Vec<Value>,
}

impl Row {
	pub fn new(mut values: Vec<Value>, schema: Schema) -> Self {
		values.resize(schema.len(), Value::Null);
		Self {
			schema,
			values,
		}
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn values(&self) -> &[Value] {
		&self.values
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
		self.schema.iter().zip(self.values.iter()).map(|(field, value)| Column::new(field, value))
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.schema.index_of(name).and_then(|idx| self.values.get(idx))
	}

	/// Encodes the row as a JSON array, element `i` being column `i`.
	///
	/// The first column that fails to encode fails the whole row.
	pub fn to_json(&self) -> Result<JsonValue, Error> {
		let mut result = Vec::with_capacity(self.values.len());
		for column in self.columns() {
			result.push(column.encode()?);
		}
		Ok(JsonValue::Array(result))
	}
}

impl Serialize for Row {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let json = self.to_json().map_err(ser::Error::custom)?;
		json.serialize(serializer)
	}
}

#[cfg(test)]
mod tests {
	use bqpod_type::{Date, Type};
	use serde_json::json;

	use super::*;
	use crate::schema::Field;

	fn schema() -> Schema {
		Schema::new(vec![
			Field::new("id", Type::Integer).required(),
			Field::new("name", Type::String),
			Field::new("amount", Type::Numeric),
			Field::new("day", Type::Date),
		])
	}

	#[test]
	fn test_to_json_keeps_schema_order() {
		let row = Row::new(
			vec![
				Value::int(7),
				Value::utf8("seven"),
				Value::decimal("7.70".parse::<bqpod_type::Decimal>().unwrap()),
				Value::Date(Date::new(2024, 1, 2).unwrap()),
			],
			schema(),
		);
		assert_eq!(row.to_json().unwrap(), json!([7, "seven", "7.70", "2024-01-02"]));
	}

	#[test]
	fn test_serialize_matches_to_json() {
		let row = Row::new(
			vec![Value::int(1), Value::Null, Value::Null, Value::Date(Date::new(2000, 2, 29).unwrap())],
			schema(),
		);
		assert_eq!(serde_json::to_string(&row).unwrap(), r#"[1,null,null,"2000-02-29"]"#);
	}

	#[test]
	fn test_failing_column_fails_row() {
		let row = Row::new(vec![Value::int(1), Value::utf8("x"), Value::Null, Value::Null], schema());
		let err = row.to_json().unwrap_err();
		assert_eq!(err.code(), "ENCODE_001");
		assert_eq!(err.diagnostic().column.as_deref(), Some("day"));
		assert!(serde_json::to_string(&row).is_err());
	}

	#[test]
	fn test_unsupported_column_fails_row() {
		let schema = Schema::new(vec![Field::new("id", Type::Integer), Field::new("payload", Type::Bytes)]);
		let row = Row::new(vec![Value::int(1), Value::utf8("AAEC")], schema);
		let err = row.to_json().unwrap_err();
		assert_eq!(err.code(), "ENCODE_002");
		assert!(err.to_string().contains("payload"));
	}

	#[test]
	fn test_get_by_name() {
		let row = Row::new(vec![Value::int(3), Value::utf8("c"), Value::Null, Value::Null], schema());
		assert_eq!(row.get("name"), Some(&Value::utf8("c")));
		assert_eq!(row.get("nope"), None);
		assert_eq!(row.columns().count(), 4);
	}

	#[test]
	fn test_short_row_padded_with_nulls() {
		let row = Row::new(vec![Value::int(1), Value::utf8("one")], schema());
		assert_eq!(row.len(), 4);
		assert_eq!(row.get("day"), Some(&Value::Null));
		assert_eq!(row.to_json().unwrap(), json!([1, "one", null, null]));
	}

	#[test]
	fn test_short_row_with_required_column_fails() {
		let row = Row::new(vec![], schema());
		let err = row.to_json().unwrap_err();
		assert_eq!(err.code(), "ENCODE_004");
		assert_eq!(err.diagnostic().column.as_deref(), Some("id"));
	}

	#[test]
	fn test_extra_values_dropped() {
		let schema = Schema::new(vec![Field::new("id", Type::Integer)]);
		let row = Row::new(vec![Value::int(1), Value::utf8("extra")], schema);
		assert_eq!(row.values(), &[Value::int(1)]);
		assert_eq!(row.to_json().unwrap(), json!([1]));
	}

	#[test]
	fn test_empty_schema() {
		let row = Row::new(vec![], Schema::default());
		assert!(row.is_empty());
		assert_eq!(row.to_json().unwrap(), json!([]));
	}
}
