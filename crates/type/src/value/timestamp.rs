// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::{
	Date, DateTime, Time,
	temporal::{NANOS_PER_SECOND, SECONDS_PER_DAY, format_fraction_trimmed, parse_two_digits},
};
use crate::{Error, error::diagnostic::temporal::invalid_timestamp, return_error};

/// An absolute point in time, stored as an offset from the Unix epoch in UTC.
///
/// Serializes to RFC 3339 in UTC with trailing fractional zeros removed,
/// e.g. `2024-03-15T10:20:30.5Z`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
	seconds: i64,
	// Always in [0, 1_000_000_000)
	nanos: u32,
}

impl Timestamp {
	pub fn new(seconds: i64, nanos: u32) -> Option<Self> {
		if nanos >= NANOS_PER_SECOND {
			return None;
		}
		Some(Self {
			seconds,
			nanos,
		})
	}

	pub fn from_micros(micros: i64) -> Self {
		Self {
			seconds: micros.div_euclid(1_000_000),
			nanos: (micros.rem_euclid(1_000_000) * 1_000) as u32,
		}
	}

	pub fn to_micros(&self) -> i64 {
		self.seconds * 1_000_000 + i64::from(self.nanos / 1_000)
	}

	pub fn seconds(&self) -> i64 {
		self.seconds
	}

	pub fn nanos(&self) -> u32 {
		self.nanos
	}

	/// The UTC civil date and time of this instant.
	pub fn to_datetime(&self) -> DateTime {
		let days = self.seconds.div_euclid(SECONDS_PER_DAY);
		let second_of_day = self.seconds.rem_euclid(SECONDS_PER_DAY) as u64;
		let date = Date::from_days_since_epoch(days as i32);
		let time = Time::from_nanos_since_midnight(second_of_day * u64::from(NANOS_PER_SECOND) + u64::from(self.nanos))
			.unwrap_or_default();
		DateTime::new(date, time)
	}

	fn from_utc_datetime(datetime: DateTime, offset_seconds: i64) -> Self {
		let days = i64::from(datetime.date().to_days_since_epoch());
		let nanos_of_day = datetime.time().to_nanos_since_midnight();
		let second_of_day = (nanos_of_day / u64::from(NANOS_PER_SECOND)) as i64;
		Self {
			seconds: days * SECONDS_PER_DAY + second_of_day - offset_seconds,
			nanos: (nanos_of_day % u64::from(NANOS_PER_SECOND)) as u32,
		}
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let datetime = self.to_datetime();
		let time = datetime.time();
		write!(
			f,
			"{}T{:02}:{:02}:{:02}{}Z",
			datetime.date(),
			time.hour(),
			time.minute(),
			time.second(),
			format_fraction_trimmed(time.nanosecond())
		)
	}
}

impl FromStr for Timestamp {
	type Err = Error;

	/// Parses RFC 3339 (`Z` or `±HH:MM` offset) and BigQuery's canonical
	/// `YYYY-MM-DD HH:MM:SS[.ffffff] UTC` form.
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		if !text.is_ascii() {
			return_error!(invalid_timestamp(text));
		}

		let (civil, offset_seconds) = if let Some(civil) = text.strip_suffix(" UTC") {
			(civil, 0)
		} else if let Some(civil) = text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
			(civil, 0)
		} else {
			let Some(split) = text.len().checked_sub(6) else {
				return_error!(invalid_timestamp(text));
			};
			let (civil, offset) = text.split_at(split);
			let sign = match offset.as_bytes()[0] {
				b'+' => 1,
				b'-' => -1,
				_ => return_error!(invalid_timestamp(text)),
			};
			let (Some(hours), Some(minutes)) = (parse_two_digits(&offset[1..3]), parse_two_digits(&offset[4..6]))
			else {
				return_error!(invalid_timestamp(text));
			};
			if &offset[3..4] != ":" {
				return_error!(invalid_timestamp(text));
			}
			(civil, sign * i64::from(hours * 3600 + minutes * 60))
		};

		let datetime =
			DateTime::from_str(civil).map_err(|e| crate::error!(invalid_timestamp(text).with_cause(e.0)))?;
		Ok(Self::from_utc_datetime(datetime, offset_seconds))
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let text = String::deserialize(deserializer)?;
		Timestamp::from_str(&text).map_err(|e| de::Error::custom(e.0.message))
	}
}
