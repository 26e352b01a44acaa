// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use bqpod_type::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, thiserror::Error)]
pub enum BigQueryError {
	#[error("environment variable {0} is missing")]
	MissingEnv(&'static str),

	#[error("environment variable {name} has an invalid value: {value}")]
	InvalidEnv {
		name: &'static str,
		value: String,
	},

	#[error("request to BigQuery failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("BigQuery returned {status}: {message}")]
	Api {
		status: u16,
		message: String,
	},

	#[error("job {job_id} did not complete within {timeout:?}")]
	JobTimeout {
		job_id: String,
		timeout: Duration,
	},

	#[error("invalid page token: {0}")]
	InvalidToken(String),

	#[error("cannot decode {raw} as {ty} for field {column}")]
	Decode {
		column: String,
		ty: String,
		raw: String,
	},
}

impl IntoDiagnostic for BigQueryError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			BigQueryError::MissingEnv(name) => Diagnostic {
				code: "CONFIG_001".to_string(),
				message: format!("{} variable is missing", name),
				column: None,
				label: None,
				help: Some(format!("export {} before starting the pod", name)),
				notes: vec![],
				cause: None,
			},

			BigQueryError::InvalidEnv {
				name,
				value,
			} => Diagnostic {
				code: "CONFIG_002".to_string(),
				message: format!("{} has an invalid value: {}", name, value),
				column: None,
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},

			BigQueryError::Request(err) => Diagnostic {
				code: "BIGQUERY_001".to_string(),
				message: format!("request to BigQuery failed: {}", err),
				column: None,
				label: None,
				help: if err.is_timeout() {
					Some("the request timed out; retry or narrow the query".to_string())
				} else {
					None
				},
				notes: vec![],
				cause: None,
			},

			BigQueryError::Api {
				status,
				message,
			} => Diagnostic {
				code: "BIGQUERY_002".to_string(),
				message,
				column: None,
				label: Some(format!("HTTP {}", status)),
				help: match status {
					401 | 403 => Some("check GOOGLE_OAUTH_ACCESS_TOKEN and the project's permissions".to_string()),
					_ => None,
				},
				notes: vec![],
				cause: None,
			},

			BigQueryError::JobTimeout {
				job_id,
				timeout,
			} => Diagnostic {
				code: "BIGQUERY_003".to_string(),
				message: format!("job {} did not complete within {}s", job_id, timeout.as_secs()),
				column: None,
				label: None,
				help: Some("raise BIGQUERY_JOB_TIMEOUT_SECS or narrow the query".to_string()),
				notes: vec![],
				cause: None,
			},

			BigQueryError::InvalidToken(token) => Diagnostic {
				code: "BIGQUERY_004".to_string(),
				message: format!("invalid page token: {}", token),
				column: None,
				label: None,
				help: Some("pass the token returned by the previous page, or an empty token to start over".to_string()),
				notes: vec![],
				cause: None,
			},

			BigQueryError::Decode {
				column,
				ty,
				raw,
			} => Diagnostic {
				code: "BIGQUERY_005".to_string(),
				message: format!("cannot decode {} as {} for field {}", raw, ty, column),
				column: Some(column),
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<BigQueryError> for Error {
	fn from(err: BigQueryError) -> Self {
		Error(err.into_diagnostic())
	}
}
