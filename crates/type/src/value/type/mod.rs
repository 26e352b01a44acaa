// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod get;

/// Declared type of a result column, as reported by the data source schema.
///
/// The first ten variants are the types the encoder knows how to convert.
/// Everything else is kept so it can be named in diagnostics, but is never
/// converted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
	Integer,
	Float,
	Boolean,
	String,
	/// 38 digits of precision, 9 after the decimal point
	Numeric,
	/// 76+ digits of precision, 38 after the decimal point
	BigNumeric,
	/// An absolute point in time, microsecond precision, UTC
	Timestamp,
	Date,
	Time,
	/// A civil date and time without a time zone
	DateTime,
	Bytes,
	Geography,
	Interval,
	Json,
	Record,
	/// A type name the data source reported that is not known here
	Other(String),
}

impl Type {
	pub const SUPPORTED_NAMES: [&'static str; 10] = [
		"INTEGER",
		"FLOAT",
		"BOOLEAN",
		"STRING",
		"NUMERIC",
		"BIGNUMERIC",
		"TIMESTAMP",
		"DATE",
		"TIME",
		"DATETIME",
	];

	/// Maps a schema type name (legacy or standard SQL spelling) to a type.
	pub fn from_name(name: &str) -> Self {
		match name.to_ascii_uppercase().as_str() {
			"INTEGER" | "INT64" => Type::Integer,
			"FLOAT" | "FLOAT64" => Type::Float,
			"BOOLEAN" | "BOOL" => Type::Boolean,
			"STRING" => Type::String,
			"NUMERIC" | "DECIMAL" => Type::Numeric,
			"BIGNUMERIC" | "BIGDECIMAL" => Type::BigNumeric,
			"TIMESTAMP" => Type::Timestamp,
			"DATE" => Type::Date,
			"TIME" => Type::Time,
			"DATETIME" => Type::DateTime,
			"BYTES" => Type::Bytes,
			"GEOGRAPHY" => Type::Geography,
			"INTERVAL" => Type::Interval,
			"JSON" => Type::Json,
			"RECORD" | "STRUCT" => Type::Record,
			_ => Type::Other(name.to_string()),
		}
	}

	pub fn is_supported(&self) -> bool {
		matches!(
			self,
			Type::Integer
				| Type::Float | Type::Boolean
				| Type::String | Type::Numeric
				| Type::BigNumeric
				| Type::Timestamp
				| Type::Date | Type::Time
				| Type::DateTime
		)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Integer => f.write_str("INTEGER"),
			Type::Float => f.write_str("FLOAT"),
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::String => f.write_str("STRING"),
			Type::Numeric => f.write_str("NUMERIC"),
			Type::BigNumeric => f.write_str("BIGNUMERIC"),
			Type::Timestamp => f.write_str("TIMESTAMP"),
			Type::Date => f.write_str("DATE"),
			Type::Time => f.write_str("TIME"),
			Type::DateTime => f.write_str("DATETIME"),
			Type::Bytes => f.write_str("BYTES"),
			Type::Geography => f.write_str("GEOGRAPHY"),
			Type::Interval => f.write_str("INTERVAL"),
			Type::Json => f.write_str("JSON"),
			Type::Record => f.write_str("RECORD"),
			Type::Other(name) => f.write_str(name),
		}
	}
}

impl Serialize for Type {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Type {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let name = String::deserialize(deserializer)?;
		Ok(Type::from_name(&name))
	}
}

/// Field mode of a schema column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
	#[default]
	Nullable,
	Required,
	Repeated,
}

impl Mode {
	/// Maps a schema mode name; an absent mode means `NULLABLE`.
	pub fn from_name(name: Option<&str>) -> Self {
		match name.map(|n| n.to_ascii_uppercase()) {
			Some(n) if n == "REQUIRED" => Mode::Required,
			Some(n) if n == "REPEATED" => Mode::Repeated,
			_ => Mode::Nullable,
		}
	}
}
