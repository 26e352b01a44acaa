// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use bqpod_type::{Diagnostic, Error, IntoDiagnostic};

/// Failure of a query operation. Scoped to the call that produced it.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
	/// The data source rejected the query or failed while rows were pulled
	#[error("query execution failed: {0}")]
	Execution(Error),

	/// A row could not be converted to JSON
	#[error("{0}")]
	Encoding(Error),

	#[error("query did not complete within {0:?}")]
	Timeout(Duration),

	#[error("query produced more than {limit} rows")]
	RowLimitExceeded {
		limit: usize,
	},

	#[error("page size must be positive, got {0}")]
	InvalidPageSize(i64),
}

impl QueryError {
	pub fn code(&self) -> &str {
		match self {
			QueryError::Execution(_) => "QUERY_001",
			QueryError::Encoding(err) => err.code(),
			QueryError::Timeout(_) => "QUERY_002",
			QueryError::RowLimitExceeded {
				..
			} => "QUERY_003",
			QueryError::InvalidPageSize(_) => "QUERY_004",
		}
	}
}

impl IntoDiagnostic for QueryError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			QueryError::Execution(err) => {
				let cause = err.diagnostic();
				Diagnostic {
					code: "QUERY_001".to_string(),
					message: format!("query execution failed: {}", cause.message),
					column: None,
					label: None,
					help: cause.help.clone(),
					notes: vec![],
					cause: Some(Box::new(cause)),
				}
			}

			QueryError::Encoding(err) => err.diagnostic(),

			QueryError::Timeout(timeout) => Diagnostic {
				code: "QUERY_002".to_string(),
				message: format!("query did not complete within {}s", timeout.as_secs_f64()),
				column: None,
				label: None,
				help: Some("narrow the query or use query-token to fetch the result in pages".to_string()),
				notes: vec!["no partial result is returned after a timeout".to_string()],
				cause: None,
			},

			QueryError::RowLimitExceeded {
				limit,
			} => Diagnostic {
				code: "QUERY_003".to_string(),
				message: format!("query produced more than {} rows", limit),
				column: None,
				label: None,
				help: Some("add a LIMIT clause or use query-token to fetch the result in pages".to_string()),
				notes: vec![],
				cause: None,
			},

			QueryError::InvalidPageSize(size) => Diagnostic {
				code: "QUERY_004".to_string(),
				message: format!("page size must be positive, got {}", size),
				column: None,
				label: Some("pageSize".to_string()),
				help: Some("pass a page size of at least 1".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<QueryError> for Error {
	fn from(err: QueryError) -> Self {
		Error(err.into_diagnostic())
	}
}
