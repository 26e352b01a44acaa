// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::value::Value;

impl Value {
	/// Short name of the runtime representation, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Integer(_) => "integer",
			Value::Float(_) => "float",
			Value::Boolean(_) => "boolean",
			Value::String(_) => "string",
			Value::Numeric(_) => "decimal",
			Value::Timestamp(_) => "timestamp",
			Value::Date(_) => "date",
			Value::Time(_) => "time",
			Value::DateTime(_) => "datetime",
			Value::Record(_) => "record",
			Value::Array(_) => "array",
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::value::Value;

	#[test]
	fn test_kind() {
		assert_eq!(Value::Null.kind(), "null");
		assert_eq!(Value::utf8("x").kind(), "string");
		assert_eq!(Value::Record(vec![]).kind(), "record");
	}
}
