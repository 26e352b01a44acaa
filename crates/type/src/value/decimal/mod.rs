// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use bigdecimal::BigDecimal as BigDecimalInner;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

mod parse;

pub use parse::parse_decimal;

/// An exact, arbitrary-precision decimal number.
///
/// Backs both `NUMERIC` and `BIGNUMERIC` columns. The textual form is always
/// plain positional notation (no exponent), so it can be parsed back without
/// loss by any decimal library.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decimal(BigDecimalInner);

impl Decimal {
	pub fn new(value: BigDecimalInner) -> Self {
		Self(value)
	}

	pub fn inner(&self) -> &BigDecimalInner {
		&self.0
	}

	pub fn into_inner(self) -> BigDecimalInner {
		self.0
	}

	/// Digits after the decimal point, as stored.
	pub fn scale(&self) -> i64 {
		let (_, scale) = self.0.as_bigint_and_exponent();
		scale
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.to_plain_string())
	}
}

impl FromStr for Decimal {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_decimal(s)
	}
}

impl From<BigDecimalInner> for Decimal {
	fn from(value: BigDecimalInner) -> Self {
		Self(value)
	}
}

impl From<i64> for Decimal {
	fn from(value: i64) -> Self {
		Self(BigDecimalInner::from(value))
	}
}

impl Serialize for Decimal {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Decimal {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let text = String::deserialize(deserializer)?;
		parse_decimal(&text).map_err(|e| de::Error::custom(e.0.message))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_keeps_scale() {
		let decimal: Decimal = "123.450".parse().unwrap();
		assert_eq!(decimal.to_string(), "123.450");
		assert_eq!(decimal.scale(), 3);
	}

	#[test]
	fn test_display_never_uses_exponent() {
		let decimal: Decimal = "1e30".parse().unwrap();
		assert_eq!(decimal.to_string(), "1000000000000000000000000000000");

		let decimal: Decimal = "1e-20".parse().unwrap();
		assert_eq!(decimal.to_string(), "0.00000000000000000001");
	}

	#[test]
	fn test_precision_beyond_f64() {
		let text = "12345678901234567890123456789.123456789";
		let decimal: Decimal = text.parse().unwrap();
		assert_eq!(decimal.to_string(), text);
		// An f64 cannot hold this many significant digits
		assert_ne!(text.parse::<f64>().unwrap().to_string(), text);
	}

	#[test]
	fn test_bignumeric_extremes() {
		let max = "578960446186580977117854925043439539266.34992332820282019728792003956564819967";
		let decimal: Decimal = max.parse().unwrap();
		assert_eq!(decimal.to_string(), max);

		let negative = format!("-{}", max);
		let decimal: Decimal = negative.parse().unwrap();
		assert_eq!(decimal.to_string(), negative);
	}

	#[test]
	fn test_serde_is_string() {
		let decimal: Decimal = "0.1".parse().unwrap();
		assert_eq!(serde_json::to_string(&decimal).unwrap(), "\"0.1\"");
		let back: Decimal = serde_json::from_str("\"0.1\"").unwrap();
		assert_eq!(back, decimal);
	}

	#[test]
	fn test_from_i64() {
		assert_eq!(Decimal::from(-42).to_string(), "-42");
	}
}
