// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Conversion of a single typed column value into its JSON form.

use bqpod_type::{
	Error, Mode, Type, Value,
	diagnostic::encode::{non_finite_float, required_null, type_mismatch, unsupported_type},
	error, return_error,
};
use serde_json::{Number, Value as JsonValue};

use crate::schema::Field;

/// Encodes `value` according to the declared type and mode of `field`.
///
/// Supported types are checked before anything else, so an unsupported
/// column fails even when its value is null.
pub fn encode(field: &Field, value: &Value) -> Result<JsonValue, Error> {
	if !field.r#type.is_supported() {
		return_error!(unsupported_type(&field.name, &field.r#type));
	}

	match field.mode {
		Mode::Repeated => match value {
			Value::Null => Ok(JsonValue::Array(vec![])),
			Value::Array(elements) => {
				let mut result = Vec::with_capacity(elements.len());
				for element in elements {
					result.push(encode_scalar(field, element, true)?);
				}
				Ok(JsonValue::Array(result))
			}
			other => Err(error!(type_mismatch(&field.name, &field.r#type, other.kind()))),
		},
		Mode::Nullable => encode_scalar(field, value, true),
		Mode::Required => encode_scalar(field, value, false),
	}
}

fn encode_scalar(field: &Field, value: &Value, nullable: bool) -> Result<JsonValue, Error> {
	let name = &field.name;
	let ty = &field.r#type;

	match (ty, value) {
		// decimals carry absence as null regardless of mode
		(Type::Numeric | Type::BigNumeric, Value::Null) => Ok(JsonValue::Null),
		(Type::Numeric | Type::BigNumeric, Value::Numeric(decimal)) => Ok(JsonValue::String(decimal.to_string())),

		(Type::Date, Value::Date(date)) => Ok(JsonValue::String(date.to_string())),
		(Type::Time, Value::Time(time)) => Ok(JsonValue::String(time.to_string())),
		(Type::DateTime, Value::DateTime(datetime)) => Ok(JsonValue::String(datetime.to_string())),

		(Type::Integer | Type::Float | Type::Boolean | Type::String | Type::Timestamp, Value::Null) => {
			if nullable {
				Ok(JsonValue::Null)
			} else {
				Err(error!(required_null(name, ty)))
			}
		}
		(Type::Integer, Value::Integer(v)) => Ok(JsonValue::Number((*v).into())),
		(Type::Float, Value::Float(v)) => match Number::from_f64(*v) {
			Some(number) => Ok(JsonValue::Number(number)),
			None => Err(error!(non_finite_float(name, *v))),
		},
		(Type::Boolean, Value::Boolean(v)) => Ok(JsonValue::Bool(*v)),
		(Type::String, Value::String(v)) => Ok(JsonValue::String(v.clone())),
		(Type::Timestamp, Value::Timestamp(ts)) => {
			serde_json::to_value(ts).map_err(|_| error!(type_mismatch(name, ty, value.kind())))
		}

		(_, other) => Err(error!(type_mismatch(name, ty, other.kind()))),
	}
}

#[cfg(test)]
mod tests {
	use bqpod_type::{Date, DateTime, Decimal, Time, Timestamp};
	use serde_json::json;

	use super::*;

	fn field(ty: Type) -> Field {
		Field::new("col", ty)
	}

	#[test]
	fn test_pass_through_types() {
		assert_eq!(encode(&field(Type::Integer), &Value::int(42)).unwrap(), json!(42));
		assert_eq!(encode(&field(Type::Float), &Value::float(1.5)).unwrap(), json!(1.5));
		assert_eq!(encode(&field(Type::Boolean), &Value::bool(true)).unwrap(), json!(true));
		assert_eq!(encode(&field(Type::String), &Value::utf8("hi")).unwrap(), json!("hi"));
	}

	#[test]
	fn test_timestamp_uses_native_form() {
		let ts = Timestamp::from_micros(1_710_498_030_500_000);
		assert_eq!(encode(&field(Type::Timestamp), &Value::Timestamp(ts)).unwrap(), json!("2024-03-15T10:20:30.5Z"));
	}

	#[test]
	fn test_numeric_is_exact_string() {
		let text = "12345678901234567890123456789.123456789";
		let decimal: Decimal = text.parse().unwrap();
		assert_eq!(encode(&field(Type::Numeric), &Value::decimal(decimal.clone())).unwrap(), json!(text));
		assert_eq!(encode(&field(Type::BigNumeric), &Value::decimal(decimal)).unwrap(), json!(text));
	}

	#[test]
	fn test_numeric_null_is_null() {
		assert_eq!(encode(&field(Type::Numeric), &Value::Null).unwrap(), JsonValue::Null);
		assert_eq!(encode(&field(Type::BigNumeric).required(), &Value::Null).unwrap(), JsonValue::Null);
	}

	#[test]
	fn test_numeric_mismatch() {
		let err = encode(&field(Type::Numeric), &Value::float(1.0)).unwrap_err();
		assert_eq!(err.code(), "ENCODE_001");
		assert_eq!(err.diagnostic().column.as_deref(), Some("col"));
	}

	#[test]
	fn test_calendar_types() {
		let date = Date::new(2024, 3, 15).unwrap();
		let time = Time::new(10, 20, 30, 123_456_000).unwrap();
		assert_eq!(encode(&field(Type::Date), &Value::Date(date)).unwrap(), json!("2024-03-15"));
		assert_eq!(encode(&field(Type::Time), &Value::Time(time)).unwrap(), json!("10:20:30.123456"));
		assert_eq!(
			encode(&field(Type::DateTime), &Value::DateTime(DateTime::new(date, time))).unwrap(),
			json!("2024-03-15T10:20:30.123456")
		);
	}

	#[test]
	fn test_calendar_null_is_mismatch() {
		for ty in [Type::Date, Type::Time, Type::DateTime] {
			let err = encode(&field(ty), &Value::Null).unwrap_err();
			assert_eq!(err.code(), "ENCODE_001");
		}
	}

	#[test]
	fn test_calendar_wrong_representation() {
		let err = encode(&field(Type::Date), &Value::utf8("2024-03-15")).unwrap_err();
		assert_eq!(err.code(), "ENCODE_001");
		assert!(err.to_string().contains("col"));
	}

	#[test]
	fn test_unsupported_type_names_column_and_type() {
		let err = encode(&Field::new("blob", Type::Bytes), &Value::utf8("AAEC")).unwrap_err();
		assert_eq!(err.code(), "ENCODE_002");
		assert_eq!(err.diagnostic().message, "Unsure how to convert field blob and type BYTES");
	}

	#[test]
	fn test_unsupported_type_fails_on_null() {
		let err = encode(&Field::new("g", Type::Geography), &Value::Null).unwrap_err();
		assert_eq!(err.code(), "ENCODE_002");
	}

	#[test]
	fn test_nullable_pass_through_null() {
		assert_eq!(encode(&field(Type::String), &Value::Null).unwrap(), JsonValue::Null);
		assert_eq!(encode(&field(Type::Timestamp), &Value::Null).unwrap(), JsonValue::Null);
	}

	#[test]
	fn test_required_null() {
		let err = encode(&field(Type::Integer).required(), &Value::Null).unwrap_err();
		assert_eq!(err.code(), "ENCODE_004");
	}

	#[test]
	fn test_non_finite_float() {
		for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
			let err = encode(&field(Type::Float), &Value::float(v)).unwrap_err();
			assert_eq!(err.code(), "ENCODE_003");
		}
	}

	#[test]
	fn test_integer_mismatch() {
		let err = encode(&field(Type::Integer), &Value::utf8("1")).unwrap_err();
		assert_eq!(err.code(), "ENCODE_001");
	}

	#[test]
	fn test_repeated() {
		let tags = field(Type::String).repeated();
		let value = Value::Array(vec![Value::utf8("a"), Value::Null, Value::utf8("b")]);
		assert_eq!(encode(&tags, &value).unwrap(), json!(["a", null, "b"]));
		assert_eq!(encode(&tags, &Value::Null).unwrap(), json!([]));
	}

	#[test]
	fn test_repeated_requires_array() {
		let err = encode(&field(Type::Integer).repeated(), &Value::int(1)).unwrap_err();
		assert_eq!(err.code(), "ENCODE_001");
	}

	#[test]
	fn test_repeated_element_error() {
		let dates = field(Type::Date).repeated();
		let err = encode(&dates, &Value::Array(vec![Value::Null])).unwrap_err();
		assert_eq!(err.code(), "ENCODE_001");
	}
}
