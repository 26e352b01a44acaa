// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{borrow::Cow, str::FromStr};

use bigdecimal::BigDecimal as BigDecimalInner;

use crate::{Error, Type, error::diagnostic::number::invalid_number_format, return_error, value::decimal::Decimal};

pub fn parse_decimal(raw_value: &str) -> Result<Decimal, Error> {
	// Fast path: check if we need any string processing
	let needs_trimming = raw_value.as_bytes().first().is_some_and(|b| b.is_ascii_whitespace())
		|| raw_value.as_bytes().last().is_some_and(|b| b.is_ascii_whitespace());
	let has_underscores = raw_value.as_bytes().contains(&b'_');

	let value = match (needs_trimming, has_underscores) {
		(false, false) => Cow::Borrowed(raw_value),
		(true, false) => Cow::Borrowed(raw_value.trim()),
		(false, true) => Cow::Owned(raw_value.replace('_', "")),
		(true, true) => Cow::Owned(raw_value.trim().replace('_', "")),
	};

	if value.is_empty() {
		return_error!(invalid_number_format(raw_value, Type::Numeric));
	}

	let big_decimal = BigDecimalInner::from_str(&value)
		.map_err(|_| crate::error!(invalid_number_format(raw_value, Type::Numeric)))?;

	Ok(Decimal::new(big_decimal))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_decimal_integer() {
		assert_eq!(parse_decimal("123").unwrap().to_string(), "123");
	}

	#[test]
	fn test_parse_decimal_with_fractional() {
		assert_eq!(parse_decimal("123.45").unwrap().to_string(), "123.45");
	}

	#[test]
	fn test_parse_decimal_with_underscores() {
		assert_eq!(parse_decimal("1_234.56").unwrap().to_string(), "1234.56");
	}

	#[test]
	fn test_parse_decimal_trims_whitespace() {
		assert_eq!(parse_decimal("  -0.5 ").unwrap().to_string(), "-0.5");
	}

	#[test]
	fn test_parse_decimal_empty() {
		let err = parse_decimal("").unwrap_err();
		assert_eq!(err.code(), "NUMBER_001");
	}

	#[test]
	fn test_parse_decimal_invalid() {
		assert!(parse_decimal("not_a_number").is_err());
		assert!(parse_decimal("1.2.3").is_err());
	}

	#[test]
	fn test_parse_decimal_scientific_notation() {
		assert_eq!(parse_decimal("1.23e2").unwrap().to_string(), "123");
	}
}
