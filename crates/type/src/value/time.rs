// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::temporal::{NANOS_PER_SECOND, format_fraction, parse_fraction, parse_two_digits};
use crate::{Error, error::diagnostic::temporal::invalid_time, return_error};

/// A time of day without date or time zone, nanosecond precision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
	nanos_since_midnight: u64,
}

impl Time {
	pub fn new(hour: u32, minute: u32, second: u32, nano: u32) -> Option<Self> {
		if hour > 23 || minute > 59 || second > 59 || nano >= NANOS_PER_SECOND {
			return None;
		}
		let seconds = u64::from(hour) * 3600 + u64::from(minute) * 60 + u64::from(second);
		Some(Self {
			nanos_since_midnight: seconds * u64::from(NANOS_PER_SECOND) + u64::from(nano),
		})
	}

	pub fn from_nanos_since_midnight(nanos: u64) -> Option<Self> {
		if nanos >= 86_400 * u64::from(NANOS_PER_SECOND) {
			return None;
		}
		Some(Self {
			nanos_since_midnight: nanos,
		})
	}

	pub fn to_nanos_since_midnight(&self) -> u64 {
		self.nanos_since_midnight
	}

	pub fn hour(&self) -> u32 {
		(self.seconds() / 3600) as u32
	}

	pub fn minute(&self) -> u32 {
		(self.seconds() / 60 % 60) as u32
	}

	pub fn second(&self) -> u32 {
		(self.seconds() % 60) as u32
	}

	pub fn nanosecond(&self) -> u32 {
		(self.nanos_since_midnight % u64::from(NANOS_PER_SECOND)) as u32
	}

	fn seconds(&self) -> u64 {
		self.nanos_since_midnight / u64::from(NANOS_PER_SECOND)
	}
}

impl Display for Time {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{:02}:{:02}:{:02}{}",
			self.hour(),
			self.minute(),
			self.second(),
			format_fraction(self.nanosecond())
		)
	}
}

impl FromStr for Time {
	type Err = Error;

	/// Parses `HH:MM:SS[.fffffffff]`.
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let (whole, fraction) = match text.split_once('.') {
			Some((whole, fraction)) => (whole, Some(fraction)),
			None => (text, None),
		};

		let mut parts = whole.split(':');
		let (Some(hour), Some(minute), Some(second), None) = (parts.next(), parts.next(), parts.next(), parts.next())
		else {
			return_error!(invalid_time(text));
		};

		let (Some(hour), Some(minute), Some(second)) =
			(parse_two_digits(hour), parse_two_digits(minute), parse_two_digits(second))
		else {
			return_error!(invalid_time(text));
		};

		let nano = match fraction {
			Some(digits) => match parse_fraction(digits) {
				Some(nano) => nano,
				None => return_error!(invalid_time(text)),
			},
			None => 0,
		};

		Time::new(hour, minute, second, nano).ok_or_else(|| crate::error!(invalid_time(text)))
	}
}

impl Serialize for Time {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Time {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let text = String::deserialize(deserializer)?;
		Time::from_str(&text).map_err(|e| de::Error::custom(e.0.message))
	}
}
