// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde_json::Value as JsonValue;
use tracing::instrument;

use super::{QueryConfig, with_timeout};
use crate::{error::QueryError, row::Row, source::DataSource};

/// Runs `sql` and collects every row of the result.
///
/// Any failure, whether on submission or on a later pull, discards the rows
/// gathered so far.
#[instrument(name = "query::fetch_all", level = "debug", skip(source, config))]
pub async fn fetch_all(source: &dyn DataSource, sql: &str, config: &QueryConfig) -> Result<Vec<Row>, QueryError> {
	with_timeout(config, async {
		let mut iter = source.execute(sql).await.map_err(QueryError::Execution)?;
		let schema = iter.schema().clone();

		let mut rows = Vec::new();
		while let Some(values) = iter.next().await.map_err(QueryError::Execution)? {
			if let Some(limit) = config.max_rows
				&& rows.len() >= limit
			{
				return Err(QueryError::RowLimitExceeded {
					limit,
				});
			}
			rows.push(Row::new(values, schema.clone()));
		}

		tracing::debug!("fetched {} rows", rows.len());
		Ok(rows)
	})
	.await
}

/// Full scan serialized as a JSON array of rows.
pub async fn query_all(source: &dyn DataSource, sql: &str, config: &QueryConfig) -> Result<JsonValue, QueryError> {
	let rows = fetch_all(source, sql, config).await?;
	encode_rows(&rows)
}

pub(super) fn encode_rows(rows: &[Row]) -> Result<JsonValue, QueryError> {
	let mut result = Vec::with_capacity(rows.len());
	for row in rows {
		result.push(row.to_json().map_err(QueryError::Encoding)?);
	}
	Ok(JsonValue::Array(result))
}
