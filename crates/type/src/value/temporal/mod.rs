// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Calendar arithmetic shared by the temporal value types.
//!
//! Conversions between civil dates and days since 1970-01-01 follow Howard
//! Hinnant's `days_from_civil` / `civil_from_days` algorithms, operating on a
//! proleptic Gregorian calendar with years shifted to start in March.

pub(crate) const NANOS_PER_SECOND: u32 = 1_000_000_000;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

pub(crate) fn is_leap_year(year: i32) -> bool {
	(year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
	match month {
		1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
		4 | 6 | 9 | 11 => 30,
		2 if is_leap_year(year) => 29,
		2 => 28,
		_ => 0,
	}
}

/// Days since the Unix epoch for a valid civil date.
pub(crate) fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
	let y = i64::from(year) - i64::from(month <= 2);
	let era = y.div_euclid(400);
	let year_of_era = y - era * 400;
	let shifted_month = (i64::from(month) + 9) % 12;
	let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
	let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
	era * 146_097 + day_of_era - 719_468
}

/// Civil date for a number of days since the Unix epoch.
pub(crate) fn civil_from_days(days: i64) -> (i32, u32, u32) {
	let z = days + 719_468;
	let era = z.div_euclid(146_097);
	let day_of_era = z - era * 146_097;
	let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
	let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
	let mp = (5 * day_of_year + 2) / 153;
	let day = (day_of_year - (153 * mp + 2) / 5 + 1) as u32;
	let month = if mp < 10 {
		mp + 3
	} else {
		mp - 9
	} as u32;
	let year = year_of_era + era * 400 + i64::from(month <= 2);
	(year as i32, month, day)
}

/// Parses the digits after a decimal point into nanoseconds.
/// Accepts one to nine digits.
pub(crate) fn parse_fraction(digits: &str) -> Option<u32> {
	if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	let value: u32 = digits.parse().ok()?;
	Some(value * 10u32.pow(9 - digits.len() as u32))
}

/// Parses exactly two ASCII digits.
pub(crate) fn parse_two_digits(text: &str) -> Option<u32> {
	if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	text.parse().ok()
}

/// Fraction as written by canonical `TIME` / `DATETIME` strings: nothing
/// for whole seconds, six digits when the value has microsecond precision,
/// nine otherwise.
pub(crate) fn format_fraction(nanos: u32) -> String {
	if nanos == 0 {
		String::new()
	} else if nanos % 1_000 == 0 {
		format!(".{:06}", nanos / 1_000)
	} else {
		format!(".{:09}", nanos)
	}
}

/// Fraction as written by RFC 3339 timestamps: trailing zeros removed.
pub(crate) fn format_fraction_trimmed(nanos: u32) -> String {
	if nanos == 0 {
		return String::new();
	}
	let digits = format!("{:09}", nanos);
	format!(".{}", digits.trim_end_matches('0'))
}
