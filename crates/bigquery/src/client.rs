// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::VecDeque, fmt::Write, sync::Arc, time::Duration};

use async_trait::async_trait;
use bqpod_core::{DataSource, RowIterator, Schema};
use bqpod_type::{Error, Value};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::time::Instant;

use crate::{
	api::{ErrorResponse, FormatOptions, JobReference, QueryRequest, QueryResponse},
	config::BigQueryConfig,
	convert::decode_row,
	error::BigQueryError,
	token::PageToken,
};

/// Server-side wait per `jobs.query` / `getQueryResults` call while a job runs.
const POLL_WAIT: Duration = Duration::from_secs(10);

/// BigQuery data source over the v2 REST API.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub struct BigQueryClient {
	inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
	http: reqwest::Client,
	config: BigQueryConfig,
}

impl BigQueryClient {
	pub fn new(config: BigQueryConfig) -> Result<Self, BigQueryError> {
		let http = reqwest::Client::builder().user_agent(concat!("bqpod/", env!("CARGO_PKG_VERSION"))).build()?;
		Ok(Self {
			inner: Arc::new(Inner {
				http,
				config,
			}),
		})
	}

	pub fn config(&self) -> &BigQueryConfig {
		&self.inner.config
	}
}

impl Inner {
	fn queries_url(&self) -> String {
		format!("{}/projects/{}/queries", self.config.api_url, self.config.project)
	}

	fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
		match &self.config.access_token {
			Some(token) => request.bearer_auth(token),
			None => request,
		}
	}

	async fn submit(&self, sql: &str) -> Result<QueryResponse, BigQueryError> {
		let body = QueryRequest {
			query: sql.to_string(),
			use_legacy_sql: false,
			max_results: 0,
			timeout_ms: POLL_WAIT.as_millis() as u64,
			format_options: FormatOptions {
				use_int64_timestamp: true,
			},
			location: self.config.location.clone(),
		};

		tracing::debug!("submitting query to project {}", self.config.project);
		let request = self.authorize(self.http.post(self.queries_url()).json(&body));
		let response: QueryResponse = send(request).await?;
		self.wait_complete(response, None, Some(0)).await
	}

	/// Re-requests the same row window until the job reports completion.
	async fn wait_complete(
		&self,
		mut response: QueryResponse,
		start: Option<u64>,
		max: Option<usize>,
	) -> Result<QueryResponse, BigQueryError> {
		let deadline = Instant::now() + self.config.job_timeout;
		while !response.job_complete {
			if Instant::now() >= deadline {
				return Err(BigQueryError::JobTimeout {
					job_id: response.job_reference.job_id,
					timeout: self.config.job_timeout,
				});
			}
			let job = response.job_reference.clone();
			tracing::debug!("waiting for job {}", job.job_id);
			response = self.results(&job, start, max).await?;
		}
		Ok(response)
	}

	/// `jobs.getQueryResults`; `start` and `max` select the row window.
	async fn results(
		&self,
		job: &JobReference,
		start: Option<u64>,
		max: Option<usize>,
	) -> Result<QueryResponse, BigQueryError> {
		// job ids and locations are restricted to [A-Za-z0-9_-], no escaping needed
		let mut url = format!(
			"{}/{}?formatOptions.useInt64Timestamp=true&timeoutMs={}",
			self.queries_url(),
			job.job_id,
			POLL_WAIT.as_millis()
		);
		if let Some(location) = &job.location {
			let _ = write!(url, "&location={}", location);
		}
		if let Some(start) = start {
			let _ = write!(url, "&startIndex={}", start);
		}
		if let Some(max) = max {
			let _ = write!(url, "&maxResults={}", max);
		}

		tracing::debug!("fetching results of job {} from {:?}", job.job_id, start);
		send(self.authorize(self.http.get(url))).await
	}
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BigQueryError> {
	let response = request.send().await?;
	if !response.status().is_success() {
		return Err(api_error(response).await);
	}
	Ok(response.json::<T>().await?)
}

async fn api_error(response: Response) -> BigQueryError {
	let status = response.status().as_u16();
	let message = match response.text().await {
		Ok(body) => match serde_json::from_str::<ErrorResponse>(&body) {
			Ok(err) => err.error.message,
			Err(_) => body,
		},
		Err(err) => err.to_string(),
	};
	tracing::warn!("BigQuery returned {}: {}", status, message);
	BigQueryError::Api {
		status,
		message,
	}
}

#[async_trait]
impl DataSource for BigQueryClient {
	async fn execute(&self, sql: &str) -> Result<Box<dyn RowIterator>, Error> {
		let response = self.inner.submit(sql).await?;
		let schema = response.schema.as_ref().map(|s| s.to_schema()).unwrap_or_default();

		Ok(Box::new(BigQueryRowIterator {
			inner: self.inner.clone(),
			total_rows: response.total_rows(),
			job: response.job_reference,
			schema,
			offset: 0,
			buffer: VecDeque::new(),
			page_size: None,
			pending: None,
		}))
	}
}

/// Row iterator over the result table of one job.
pub struct BigQueryRowIterator {
	inner: Arc<Inner>,
	job: JobReference,
	schema: Schema,
	/// Unknown after resuming into another job until its first page arrives
	total_rows: Option<u64>,
	/// Absolute index of the next row `next` returns
	offset: u64,
	buffer: VecDeque<Vec<Value>>,
	page_size: Option<usize>,
	/// Surfaced on the next pull
	pending: Option<BigQueryError>,
}

impl BigQueryRowIterator {
	fn exhausted(&self) -> bool {
		self.total_rows.is_some_and(|total| self.offset >= total)
	}

	async fn fill(&mut self) -> Result<(), BigQueryError> {
		let response = self.inner.results(&self.job, Some(self.offset), self.page_size).await?;
		let response = self.inner.wait_complete(response, Some(self.offset), self.page_size).await?;
		if let Some(total) = response.total_rows() {
			self.total_rows = Some(total);
		}
		for row in &response.rows {
			self.buffer.push_back(decode_row(&self.schema, row)?);
		}
		if response.rows.is_empty() {
			// nothing left past offset, whatever totalRows claimed
			self.total_rows = Some(self.offset);
		}
		Ok(())
	}
}

#[async_trait]
impl RowIterator for BigQueryRowIterator {
	fn schema(&self) -> &Schema {
		&self.schema
	}

	fn resume_from(&mut self, token: &str) {
		match token.parse::<PageToken>() {
			Ok(token) => {
				if token.job_id != self.job.job_id {
					self.job = JobReference {
						project_id: self.job.project_id.clone(),
						job_id: token.job_id,
						location: token.location,
					};
					self.total_rows = None;
				}
				self.offset = token.offset;
				self.buffer.clear();
			}
			Err(err) => self.pending = Some(err),
		}
	}

	fn set_page_size(&mut self, page_size: usize) {
		self.page_size = Some(page_size);
	}

	async fn next(&mut self) -> Result<Option<Vec<Value>>, Error> {
		if let Some(err) = self.pending.take() {
			return Err(err.into());
		}
		if self.buffer.is_empty() {
			if self.exhausted() {
				return Ok(None);
			}
			self.fill().await?;
		}
		match self.buffer.pop_front() {
			Some(values) => {
				self.offset += 1;
				Ok(Some(values))
			}
			None => Ok(None),
		}
	}

	fn token(&self) -> String {
		if self.exhausted() {
			return String::new();
		}
		PageToken {
			job_id: self.job.job_id.clone(),
			location: self.job.location.clone(),
			offset: self.offset,
		}
		.to_string()
	}
}
