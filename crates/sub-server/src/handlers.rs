// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The query vars, bound to a shared data source.

use std::sync::Arc;

use async_trait::async_trait;
use bqpod_core::{DataSource, QueryConfig, query_all, query_page};
use bqpod_type::Error;
use serde_json::Value as JsonValue;

use crate::{
	args::decode_args,
	registry::{Handler, Namespace, Var},
};

pub const NAMESPACE: &str = "netpod.jlabath.bigquery";

/// `query(sql)`: every row of the result as a JSON array.
pub struct QueryHandler {
	source: Arc<dyn DataSource>,
	config: QueryConfig,
}

impl QueryHandler {
	pub fn new(source: Arc<dyn DataSource>, config: QueryConfig) -> Self {
		Self {
			source,
			config,
		}
	}
}

#[async_trait]
impl Handler for QueryHandler {
	async fn call(&self, args: Vec<JsonValue>) -> Result<JsonValue, Error> {
		let (sql,): (String,) = decode_args(args)?;
		Ok(query_all(self.source.as_ref(), &sql, &self.config).await?)
	}
}

/// `query-token(sql, token, pageSize)`: one page plus the token for the next.
pub struct QueryTokenHandler {
	source: Arc<dyn DataSource>,
	config: QueryConfig,
}

impl QueryTokenHandler {
	pub fn new(source: Arc<dyn DataSource>, config: QueryConfig) -> Self {
		Self {
			source,
			config,
		}
	}
}

#[async_trait]
impl Handler for QueryTokenHandler {
	async fn call(&self, args: Vec<JsonValue>) -> Result<JsonValue, Error> {
		let (sql, token, page_size): (String, String, i64) = decode_args(args)?;
		Ok(query_page(self.source.as_ref(), &sql, &token, page_size, &self.config).await?)
	}
}

/// The `netpod.jlabath.bigquery` namespace over `source`.
pub fn query_namespace(source: Arc<dyn DataSource>, config: QueryConfig) -> Namespace {
	Namespace::new(NAMESPACE)
		.with_var(Var::new("query", QueryHandler::new(source.clone(), config.clone())))
		.with_var(Var::new("query-token", QueryTokenHandler::new(source, config)))
}
