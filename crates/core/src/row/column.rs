// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bqpod_type::{Error, Value};
use serde_json::Value as JsonValue;

use crate::{encode::encode, schema::Field};

/// Borrowed view of one cell: its descriptor and its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column<'a> {
	pub field: &'a Field,
	pub value: &'a Value,
}

impl<'a> Column<'a> {
	pub fn new(field: &'a Field, value: &'a Value) -> Self {
		Self {
			field,
			value,
		}
	}

	pub fn name(&self) -> &'a str {
		&self.field.name
	}

	pub fn encode(&self) -> Result<JsonValue, Error> {
		encode(self.field, self.value)
	}
}
