// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Decoding of `f`/`v` cells into runtime values.
//!
//! BigQuery sends every scalar as a JSON string (or null), repeated fields as
//! `[{"v": ...}]` and records as `{"f": [{"v": ...}]}`.

use bqpod_core::Field;
use bqpod_type::{Date, DateTime, Mode, Time, Timestamp, Type, Value, value::decimal::parse_decimal};
use serde_json::Value as JsonValue;

use crate::{api::TableRow, error::BigQueryError};

pub fn decode_row(fields: &[Field], row: &TableRow) -> Result<Vec<Value>, BigQueryError> {
	let mut values = Vec::with_capacity(fields.len());
	for (idx, field) in fields.iter().enumerate() {
		let cell = row.f.get(idx).map(|cell| &cell.v).unwrap_or(&JsonValue::Null);
		values.push(decode_cell(field, cell)?);
	}
	Ok(values)
}

pub fn decode_cell(field: &Field, cell: &JsonValue) -> Result<Value, BigQueryError> {
	match field.mode {
		Mode::Repeated => match cell {
			JsonValue::Null => Ok(Value::Array(vec![])),
			JsonValue::Array(elements) => {
				let mut values = Vec::with_capacity(elements.len());
				for element in elements {
					let inner = element.get("v").unwrap_or(&JsonValue::Null);
					values.push(decode_scalar(field, inner)?);
				}
				Ok(Value::Array(values))
			}
			other => Err(decode_error(field, other)),
		},
		Mode::Nullable | Mode::Required => decode_scalar(field, cell),
	}
}

fn decode_scalar(field: &Field, cell: &JsonValue) -> Result<Value, BigQueryError> {
	if cell.is_null() {
		return Ok(Value::Null);
	}

	if field.r#type == Type::Record {
		let cells = match cell.get("f") {
			Some(JsonValue::Array(cells)) => cells,
			_ => return Err(decode_error(field, cell)),
		};
		let mut values = Vec::with_capacity(field.fields.len());
		for (idx, sub) in field.fields.iter().enumerate() {
			let inner = cells.get(idx).and_then(|c| c.get("v")).unwrap_or(&JsonValue::Null);
			values.push(decode_cell(sub, inner)?);
		}
		return Ok(Value::Record(values));
	}

	let text = match cell {
		JsonValue::String(text) => text.as_str(),
		other => return Err(decode_error(field, other)),
	};
	let invalid = || decode_error(field, cell);

	let value = match field.r#type {
		Type::Integer => Value::Integer(text.parse().map_err(|_| invalid())?),
		Type::Float => Value::Float(text.parse().map_err(|_| invalid())?),
		Type::Boolean => match text {
			"true" => Value::Boolean(true),
			"false" => Value::Boolean(false),
			_ => return Err(invalid()),
		},
		Type::String => Value::String(text.to_string()),
		Type::Numeric | Type::BigNumeric => Value::Numeric(parse_decimal(text).map_err(|_| invalid())?),
		Type::Timestamp => Value::Timestamp(parse_timestamp(text).ok_or_else(invalid)?),
		Type::Date => Value::Date(text.parse::<Date>().map_err(|_| invalid())?),
		Type::Time => Value::Time(text.parse::<Time>().map_err(|_| invalid())?),
		Type::DateTime => Value::DateTime(text.parse::<DateTime>().map_err(|_| invalid())?),
		// left for the encoder to reject
		_ => Value::String(text.to_string()),
	};
	Ok(value)
}

/// int64 microseconds since the epoch, or float seconds in older responses.
fn parse_timestamp(text: &str) -> Option<Timestamp> {
	if let Ok(micros) = text.parse::<i64>() {
		return Some(Timestamp::from_micros(micros));
	}
	let seconds = text.parse::<f64>().ok().filter(|s| s.is_finite())?;
	let micros = (seconds * 1_000_000.0).round();
	if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
		return None;
	}
	Some(Timestamp::from_micros(micros as i64))
}

fn decode_error(field: &Field, raw: &JsonValue) -> BigQueryError {
	BigQueryError::Decode {
		column: field.name.clone(),
		ty: field.r#type.to_string(),
		raw: raw.to_string(),
	}
}
