// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bqpod_type::{Diagnostic, Error, IntoDiagnostic};

/// Failure to route a request to a handler.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
	#[error("unknown var {0}")]
	UnknownVar(String),

	#[error("invalid arguments: {0}")]
	InvalidArgs(String),

	#[error("malformed request: {0}")]
	MalformedRequest(String),

	#[error("too many requests in flight on this connection (limit {limit})")]
	Busy {
		limit: usize,
	},
}

impl IntoDiagnostic for DispatchError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			DispatchError::UnknownVar(var) => Diagnostic {
				code: "DISPATCH_001".to_string(),
				message: format!("unknown var {}", var),
				column: None,
				label: None,
				help: Some("send a describe request to list the available vars".to_string()),
				notes: vec![],
				cause: None,
			},

			DispatchError::InvalidArgs(reason) => Diagnostic {
				code: "DISPATCH_002".to_string(),
				message: format!("invalid arguments: {}", reason),
				column: None,
				label: None,
				help: Some(
					"query takes [sql]; query-token takes [sql, token, pageSize]".to_string(),
				),
				notes: vec![],
				cause: None,
			},

			DispatchError::MalformedRequest(reason) => Diagnostic {
				code: "DISPATCH_003".to_string(),
				message: format!("malformed request: {}", reason),
				column: None,
				label: None,
				help: Some(
					r#"requests are one JSON object per line, e.g. {"id": "1", "op": "describe"}"#.to_string(),
				),
				notes: vec![],
				cause: None,
			},

			DispatchError::Busy {
				limit,
			} => Diagnostic {
				code: "DISPATCH_004".to_string(),
				message: format!("too many requests in flight on this connection (limit {})", limit),
				column: None,
				label: None,
				help: Some("wait for earlier responses before sending more invokes".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<DispatchError> for Error {
	fn from(err: DispatchError) -> Self {
		Error(err.into_diagnostic())
	}
}

/// Failure to bring the socket server up or down.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("failed to bind {path}: {source}")]
	Bind {
		path: String,
		source: std::io::Error,
	},

	#[error("failed to remove socket file {path}: {source}")]
	RemoveSocket {
		path: String,
		source: std::io::Error,
	},
}
