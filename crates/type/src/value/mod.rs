// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

mod date;
mod datetime;
pub mod decimal;
pub mod temporal;
mod time;
mod timestamp;
mod r#type;

pub use date::Date;
pub use datetime::DateTime;
pub use decimal::Decimal;
pub use time::Time;
pub use timestamp::Timestamp;
pub use r#type::{Mode, Type};

/// A single runtime value of a result row, represented as a native Rust type.
///
/// The representation is independent of the declared column type; whether a
/// value fits its column is decided by the encoder.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// The value is absent (SQL NULL)
	Null,
	/// A 64-bit signed integer
	Integer(i64),
	/// A 64-bit floating point number
	Float(f64),
	/// A boolean: true or false
	Boolean(bool),
	/// UTF-8 text
	String(String),
	/// An arbitrary-precision decimal (NUMERIC and BIGNUMERIC)
	Numeric(Decimal),
	/// An absolute point in time, UTC
	Timestamp(Timestamp),
	/// A calendar date
	Date(Date),
	/// A time of day
	Time(Time),
	/// A civil date and time
	DateTime(DateTime),
	/// The fields of a nested record, in schema order
	Record(Vec<Value>),
	/// The elements of a repeated field
	Array(Vec<Value>),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn int(v: impl Into<i64>) -> Self {
		Value::Integer(v.into())
	}

	pub fn float(v: impl Into<f64>) -> Self {
		Value::Float(v.into())
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::String(v.into())
	}

	pub fn decimal(v: impl Into<Decimal>) -> Self {
		Value::Numeric(v.into())
	}

	pub fn timestamp(v: impl Into<Timestamp>) -> Self {
		Value::Timestamp(v.into())
	}

	pub fn date(v: impl Into<Date>) -> Self {
		Value::Date(v.into())
	}

	pub fn time(v: impl Into<Time>) -> Self {
		Value::Time(v.into())
	}

	pub fn datetime(v: impl Into<DateTime>) -> Self {
		Value::DateTime(v.into())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Integer(value) => Display::fmt(value, f),
			Value::Float(value) => Display::fmt(value, f),
			Value::Boolean(value) => Display::fmt(value, f),
			Value::String(value) => Display::fmt(value, f),
			Value::Numeric(value) => Display::fmt(value, f),
			Value::Timestamp(value) => Display::fmt(value, f),
			Value::Date(value) => Display::fmt(value, f),
			Value::Time(value) => Display::fmt(value, f),
			Value::DateTime(value) => Display::fmt(value, f),
			Value::Record(values) => write_list(f, '{', '}', values),
			Value::Array(values) => write_list(f, '[', ']', values),
		}
	}
}

fn write_list(f: &mut Formatter<'_>, open: char, close: char, values: &[Value]) -> std::fmt::Result {
	write!(f, "{}", open)?;
	for (i, value) in values.iter().enumerate() {
		if i > 0 {
			f.write_str(", ")?;
		}
		Display::fmt(value, f)?;
	}
	write!(f, "{}", close)
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Integer(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Null)
	}
}
