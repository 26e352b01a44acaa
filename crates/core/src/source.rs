// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use bqpod_type::{Error, Value};

use crate::schema::Schema;

/// Something that can run a SQL query and hand back a row iterator.
///
/// Shared across concurrent invocations, so implementations must not keep
/// per-call state on `self`.
#[async_trait]
pub trait DataSource: Send + Sync {
	async fn execute(&self, sql: &str) -> Result<Box<dyn RowIterator>, Error>;
}

/// Cursor over the rows of one executed query.
#[async_trait]
pub trait RowIterator: Send {
	/// Schema of every row this iterator yields.
	fn schema(&self) -> &Schema;

	/// Positions the iterator at a continuation token from a previous call.
	/// Must be called before the first [`RowIterator::next`].
	fn resume_from(&mut self, token: &str);

	/// Hint for how many rows the source should fetch per round trip.
	fn set_page_size(&mut self, page_size: usize);

	/// Next row in schema order, or `None` once the result is exhausted.
	async fn next(&mut self) -> Result<Option<Vec<Value>>, Error>;

	/// Token that resumes right after the last row returned by `next`.
	/// Empty once the result is exhausted.
	fn token(&self) -> String;
}
