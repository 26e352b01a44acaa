// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::{Date, Time};
use crate::{Error, error::diagnostic::temporal::invalid_datetime};

/// A civil date and time without a time zone, as in BigQuery's `DATETIME`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime {
	date: Date,
	time: Time,
}

impl DateTime {
	pub fn new(date: Date, time: Time) -> Self {
		Self {
			date,
			time,
		}
	}

	pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, nano: u32) -> Option<Self> {
		Some(Self::new(Date::new(year, month, day)?, Time::new(hour, minute, second, nano)?))
	}

	pub fn date(&self) -> Date {
		self.date
	}

	pub fn time(&self) -> Time {
		self.time
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}T{}", self.date, self.time)
	}
}

impl FromStr for DateTime {
	type Err = Error;

	/// Parses `YYYY-MM-DD[T| ]HH:MM:SS[.fffffffff]`.
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let (date, time) = text
			.split_once(|c| c == 'T' || c == ' ')
			.ok_or_else(|| crate::error!(invalid_datetime(text)))?;

		let date = Date::from_str(date).map_err(|e| crate::error!(invalid_datetime(text).with_cause(e.0)))?;
		let time = Time::from_str(time).map_err(|e| crate::error!(invalid_datetime(text).with_cause(e.0)))?;
		Ok(Self::new(date, time))
	}
}

impl From<Date> for DateTime {
	fn from(date: Date) -> Self {
		Self::new(date, Time::default())
	}
}

impl Serialize for DateTime {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for DateTime {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let text = String::deserialize(deserializer)?;
		DateTime::from_str(&text).map_err(|e| de::Error::custom(e.0.message))
	}
}
