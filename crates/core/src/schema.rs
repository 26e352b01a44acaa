// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use bqpod_type::{Mode, Type};
use serde::{Deserialize, Serialize};

/// Descriptor of one result column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
	pub name: String,
	#[serde(rename = "type")]
	pub r#type: Type,
	#[serde(default)]
	pub mode: Mode,
	/// Sub-fields of a `RECORD` column, empty otherwise
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<Field>,
}

impl Field {
	pub fn new(name: impl Into<String>, r#type: Type) -> Self {
		Self {
			name: name.into(),
			r#type,
			mode: Mode::Nullable,
			fields: vec![],
		}
	}

	pub fn required(mut self) -> Self {
		self.mode = Mode::Required;
		self
	}

	pub fn repeated(mut self) -> Self {
		self.mode = Mode::Repeated;
		self
	}

	pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
		self.fields = fields;
		self
	}
}

/// Ordered column descriptors of a result set.
///
/// Cheap to clone; every row of a result set shares the same schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema(Arc<[Field]>);

impl Schema {
	pub fn new(fields: Vec<Field>) -> Self {
		Self(fields.into())
	}

	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.0.iter().position(|field| field.name == name)
	}
}

impl Deref for Schema {
	type Target = [Field];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<Field>> for Schema {
	fn from(fields: Vec<Field>) -> Self {
		Self::new(fields)
	}
}

impl FromIterator<Field> for Schema {
	fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_schema_preserves_order() {
		let schema = Schema::new(vec![Field::new("b", Type::String), Field::new("a", Type::Integer)]);
		assert_eq!(schema.len(), 2);
		assert_eq!(schema[0].name, "b");
		assert_eq!(schema.index_of("a"), Some(1));
		assert_eq!(schema.index_of("missing"), None);
	}

	#[test]
	fn test_field_builders() {
		let field = Field::new("tags", Type::String).repeated();
		assert_eq!(field.mode, Mode::Repeated);
		assert_eq!(Field::new("id", Type::Integer).required().mode, Mode::Required);
	}

	#[test]
	fn test_field_deserialize_defaults_mode() {
		let field: Field = serde_json::from_str(r#"{"name": "x", "type": "INT64"}"#).unwrap();
		assert_eq!(field, Field::new("x", Type::Integer));
	}
}
