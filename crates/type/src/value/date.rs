// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

use super::temporal::{civil_from_days, days_from_civil, days_in_month};
use crate::{Error, error::diagnostic::temporal::invalid_date, return_error};

/// A calendar date (year, month, day) without time or time zone, as in
/// BigQuery's `DATE` type.
///
/// Internally stored as days since Unix epoch (1970-01-01).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
	// Negative values are dates before 1970
	days_since_epoch: i32,
}

impl Date {
	pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
		if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
			return None;
		}
		let days = days_from_civil(year, month, day);
		Some(Self {
			days_since_epoch: i32::try_from(days).ok()?,
		})
	}

	pub fn from_days_since_epoch(days: i32) -> Self {
		Self {
			days_since_epoch: days,
		}
	}

	pub fn to_days_since_epoch(&self) -> i32 {
		self.days_since_epoch
	}

	pub fn year(&self) -> i32 {
		self.ymd().0
	}

	pub fn month(&self) -> u32 {
		self.ymd().1
	}

	pub fn day(&self) -> u32 {
		self.ymd().2
	}

	fn ymd(&self) -> (i32, u32, u32) {
		civil_from_days(i64::from(self.days_since_epoch))
	}
}

impl Display for Date {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let (year, month, day) = self.ymd();
		if year < 0 {
			write!(f, "-{:04}-{:02}-{:02}", -year, month, day)
		} else {
			write!(f, "{:04}-{:02}-{:02}", year, month, day)
		}
	}
}

impl FromStr for Date {
	type Err = Error;

	/// Parses `YYYY-MM-DD`, with an optional leading `-` for years before 1 AD.
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let (negative, rest) = match text.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, text),
		};

		let mut parts = rest.split('-');
		let (Some(year), Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next(), parts.next())
		else {
			return_error!(invalid_date(text));
		};

		if year.len() < 4 || !year.bytes().all(|b| b.is_ascii_digit()) || month.len() != 2 || day.len() != 2 {
			return_error!(invalid_date(text));
		}

		let (Ok(year), Ok(month), Ok(day)) = (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>()) else {
			return_error!(invalid_date(text));
		};
		let year = if negative {
			-year
		} else {
			year
		};

		Date::new(year, month, day).ok_or_else(|| crate::error!(invalid_date(text)))
	}
}

// ISO 8601 string form, same as Display
impl Serialize for Date {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
	type Value = Date;

	fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
		formatter.write_str("a date in ISO 8601 format (YYYY-MM-DD)")
	}

	fn visit_str<E>(self, value: &str) -> Result<Date, E>
	where
		E: de::Error,
	{
		Date::from_str(value).map_err(|e| E::custom(e.0.message))
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(DateVisitor)
	}
}
