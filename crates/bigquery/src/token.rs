// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Continuation token: `<jobId>:<location>:<offset>`.
//!
//! The offset is the absolute index of the next row to return. Location may
//! be empty when the job was created without one.

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use crate::error::BigQueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
	pub job_id: String,
	pub location: Option<String>,
	pub offset: u64,
}

impl Display for PageToken {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.job_id, self.location.as_deref().unwrap_or(""), self.offset)
	}
}

impl FromStr for PageToken {
	type Err = BigQueryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || BigQueryError::InvalidToken(s.to_string());

		let mut parts = s.split(':');
		let (Some(job_id), Some(location), Some(offset), None) =
			(parts.next(), parts.next(), parts.next(), parts.next())
		else {
			return Err(invalid());
		};

		if job_id.is_empty() || !job_id.chars().all(is_id_char) || !location.chars().all(is_id_char) {
			return Err(invalid());
		}
		let offset = offset.parse::<u64>().map_err(|_| invalid())?;

		Ok(Self {
			job_id: job_id.to_string(),
			location: (!location.is_empty()).then(|| location.to_string()),
			offset,
		})
	}
}

/// Characters BigQuery allows in job ids and location names. The token ends
/// up in a request path, so nothing else gets through.
fn is_id_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
