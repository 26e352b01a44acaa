// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory data source with scripted failures.
//!
//! Results are registered per SQL text. Continuation tokens have the form
//! `mem:<offset>`, where offset is the index of the next row to return.

use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
	time::Duration,
};

use async_trait::async_trait;
use bqpod_core::{DataSource, RowIterator, Schema};
use bqpod_type::{Diagnostic, Error, Value};

const TOKEN_PREFIX: &str = "mem:";

#[derive(Clone, Debug)]
struct Table {
	schema: Schema,
	rows: Arc<Vec<Vec<Value>>>,
	/// Pulling the row at this index fails with the message
	fail_at: Option<(usize, String)>,
}

#[derive(Debug, Default)]
struct Recorded {
	executions: Vec<String>,
	page_sizes: Vec<usize>,
	pulls: usize,
}

/// Scripted [`DataSource`] for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
	tables: HashMap<String, Table>,
	execute_failures: HashMap<String, String>,
	pull_delay: Option<Duration>,
	recorded: Arc<Mutex<Recorded>>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the result returned for `sql`.
	pub fn with_table(mut self, sql: impl Into<String>, schema: impl Into<Schema>, rows: Vec<Vec<Value>>) -> Self {
		self.tables.insert(
			sql.into(),
			Table {
				schema: schema.into(),
				rows: Arc::new(rows),
				fail_at: None,
			},
		);
		self
	}

	/// Makes submitting `sql` fail.
	pub fn fail_execute(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
		self.execute_failures.insert(sql.into(), message.into());
		self
	}

	/// Makes pulling row `index` of the result for `sql` fail.
	/// The result must already be registered.
	pub fn fail_at(mut self, sql: &str, index: usize, message: impl Into<String>) -> Self {
		if let Some(table) = self.tables.get_mut(sql) {
			table.fail_at = Some((index, message.into()));
		}
		self
	}

	/// Sleeps this long before every pull.
	pub fn with_pull_delay(mut self, delay: Duration) -> Self {
		self.pull_delay = Some(delay);
		self
	}

	/// SQL texts submitted so far, in order.
	pub fn executions(&self) -> Vec<String> {
		self.recorded.lock().map(|r| r.executions.clone()).unwrap_or_default()
	}

	/// Page size hints received so far, in order.
	pub fn page_sizes(&self) -> Vec<usize> {
		self.recorded.lock().map(|r| r.page_sizes.clone()).unwrap_or_default()
	}

	/// Row pulls started so far, across every execution.
	pub fn pulls(&self) -> usize {
		self.recorded.lock().map(|r| r.pulls).unwrap_or_default()
	}
}

#[async_trait]
impl DataSource for MemorySource {
	async fn execute(&self, sql: &str) -> Result<Box<dyn RowIterator>, Error> {
		if let Ok(mut recorded) = self.recorded.lock() {
			recorded.executions.push(sql.to_string());
		}

		if let Some(message) = self.execute_failures.get(sql) {
			return Err(memory_error("MEMORY_001", message));
		}

		let table = self
			.tables
			.get(sql)
			.cloned()
			.ok_or_else(|| memory_error("MEMORY_002", &format!("no result registered for: {}", sql)))?;

		Ok(Box::new(MemoryIterator {
			table,
			offset: 0,
			pending: None,
			pull_delay: self.pull_delay,
			recorded: self.recorded.clone(),
		}))
	}
}

struct MemoryIterator {
	table: Table,
	offset: usize,
	/// Error surfaced on the next pull, set by an unusable token
	pending: Option<Error>,
	pull_delay: Option<Duration>,
	recorded: Arc<Mutex<Recorded>>,
}

#[async_trait]
impl RowIterator for MemoryIterator {
	fn schema(&self) -> &Schema {
		&self.table.schema
	}

	fn resume_from(&mut self, token: &str) {
		match token.strip_prefix(TOKEN_PREFIX).and_then(|offset| offset.parse::<usize>().ok()) {
			Some(offset) => self.offset = offset,
			None => self.pending = Some(memory_error("MEMORY_003", &format!("invalid token: {}", token))),
		}
	}

	fn set_page_size(&mut self, page_size: usize) {
		if let Ok(mut recorded) = self.recorded.lock() {
			recorded.page_sizes.push(page_size);
		}
	}

	async fn next(&mut self) -> Result<Option<Vec<Value>>, Error> {
		if let Ok(mut recorded) = self.recorded.lock() {
			recorded.pulls += 1;
		}
		if let Some(delay) = self.pull_delay {
			tokio::time::sleep(delay).await;
		}
		if let Some(err) = self.pending.take() {
			return Err(err);
		}
		if let Some((index, message)) = &self.table.fail_at
			&& *index == self.offset
		{
			return Err(memory_error("MEMORY_001", message));
		}

		match self.table.rows.get(self.offset) {
			Some(values) => {
				self.offset += 1;
				Ok(Some(values.clone()))
			}
			None => Ok(None),
		}
	}

	fn token(&self) -> String {
		if self.offset < self.table.rows.len() {
			format!("{}{}", TOKEN_PREFIX, self.offset)
		} else {
			String::new()
		}
	}
}

fn memory_error(code: &str, message: &str) -> Error {
	Error(Diagnostic::new(code, message))
}
