// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::instrument;

use super::{QueryConfig, full::encode_rows, with_timeout};
use crate::{error::QueryError, row::Row, source::DataSource};

/// One page of a result plus the token that continues it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryPage {
	pub rows: Vec<Row>,
	/// Empty when there are no rows after this page
	pub token: String,
}

impl QueryPage {
	pub fn is_last(&self) -> bool {
		self.token.is_empty()
	}

	/// `{"rows": [...], "token": "..."}`
	pub fn to_json(&self) -> Result<JsonValue, QueryError> {
		let mut object = Map::with_capacity(2);
		object.insert("rows".to_string(), encode_rows(&self.rows)?);
		object.insert("token".to_string(), JsonValue::String(self.token.clone()));
		Ok(JsonValue::Object(object))
	}
}

/// Runs `sql` and returns at most `page_size` rows, starting at `token`.
///
/// An empty `token` starts at the first row. The returned token is whatever
/// the iterator reports after the last pulled row.
#[instrument(name = "query::fetch_page", level = "debug", skip(source, config))]
pub async fn fetch_page(
	source: &dyn DataSource,
	sql: &str,
	token: &str,
	page_size: i64,
	config: &QueryConfig,
) -> Result<QueryPage, QueryError> {
	let page_size = match usize::try_from(page_size) {
		Ok(size) if size > 0 => size,
		_ => return Err(QueryError::InvalidPageSize(page_size)),
	};

	with_timeout(config, async {
		let mut iter = source.execute(sql).await.map_err(QueryError::Execution)?;
		if !token.is_empty() {
			iter.resume_from(token);
		}
		iter.set_page_size(page_size);
		let schema = iter.schema().clone();

		let mut rows = Vec::with_capacity(page_size);
		for _ in 0..page_size {
			match iter.next().await.map_err(QueryError::Execution)? {
				Some(values) => rows.push(Row::new(values, schema.clone())),
				None => break,
			}
		}

		let token = iter.token();
		tracing::debug!("fetched page of {} rows, last: {}", rows.len(), token.is_empty());
		Ok(QueryPage {
			rows,
			token,
		})
	})
	.await
}

/// Paginated scan serialized as `{"rows": [...], "token": "..."}`.
pub async fn query_page(
	source: &dyn DataSource,
	sql: &str,
	token: &str,
	page_size: i64,
	config: &QueryConfig,
) -> Result<JsonValue, QueryError> {
	fetch_page(source, sql, token, page_size, config).await?.to_json()
}
