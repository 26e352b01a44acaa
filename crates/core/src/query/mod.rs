// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The two query operations: full scan and resumable page.

use std::{future::Future, time::Duration};

use tokio::time::timeout;

use crate::error::QueryError;

mod full;
mod page;

pub use full::{fetch_all, query_all};
pub use page::{QueryPage, fetch_page, query_page};

/// Per-call bounds applied by both operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryConfig {
	/// Wall-clock bound on the whole call, submission included
	pub timeout: Option<Duration>,
	/// Upper bound on the rows a full scan may accumulate
	pub max_rows: Option<usize>,
}

impl QueryConfig {
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn with_max_rows(mut self, max_rows: usize) -> Self {
		self.max_rows = Some(max_rows);
		self
	}
}

async fn with_timeout<T, F>(config: &QueryConfig, future: F) -> Result<T, QueryError>
where
	F: Future<Output = Result<T, QueryError>>,
{
	match config.timeout {
		Some(limit) => timeout(limit, future).await.map_err(|_| QueryError::Timeout(limit))?,
		None => future.await,
	}
}
