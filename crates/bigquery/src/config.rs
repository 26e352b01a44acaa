// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, time::Duration};

use crate::error::BigQueryError;

pub const DEFAULT_API_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection settings of the BigQuery data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigQueryConfig {
	pub project: String,
	pub api_url: String,
	/// Job location, e.g. `US` or `europe-west1`
	pub location: Option<String>,
	/// OAuth2 bearer token sent with every request
	pub access_token: Option<String>,
	/// How long to wait for a submitted job to complete
	pub job_timeout: Duration,
}

impl BigQueryConfig {
	pub fn new(project: impl Into<String>) -> Self {
		Self {
			project: project.into(),
			api_url: DEFAULT_API_URL.to_string(),
			location: None,
			access_token: None,
			job_timeout: DEFAULT_JOB_TIMEOUT,
		}
	}

	pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
		self.api_url = api_url.into();
		self
	}

	pub fn with_location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());
		self
	}

	pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(token.into());
		self
	}

	pub fn from_env() -> Result<Self, BigQueryError> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Builds the config from a variable lookup. Empty values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, BigQueryError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

		let project = get("GOOGLE_CLOUD_PROJECT").ok_or(BigQueryError::MissingEnv("GOOGLE_CLOUD_PROJECT"))?;
		let mut config = Self::new(project);

		if let Some(api_url) = get("BIGQUERY_API_URL") {
			config.api_url = api_url.trim_end_matches('/').to_string();
		}
		config.location = get("BIGQUERY_LOCATION");
		config.access_token = get("GOOGLE_OAUTH_ACCESS_TOKEN");

		if let Some(value) = get("BIGQUERY_JOB_TIMEOUT_SECS") {
			let secs = value.trim().parse::<u64>().ok().filter(|secs| *secs > 0).ok_or(
				BigQueryError::InvalidEnv {
					name: "BIGQUERY_JOB_TIMEOUT_SECS",
					value,
				},
			)?;
			config.job_timeout = Duration::from_secs(secs);
		}

		Ok(config)
	}
}
