// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wire messages of the pod protocol.
//!
//! One JSON object per line in both directions. Every request carries an
//! `id` that the matching response echoes, so a client can have several
//! invocations in flight on one connection.

use bqpod_type::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Wire format reported by `describe`.
pub const FORMAT: &str = "json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
	pub id: String,
	#[serde(flatten)]
	pub payload: RequestPayload,
}

/// Discriminated by the `op` field:
/// - `"describe"` - list namespaces and vars
/// - `"invoke"` - call a var with positional arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum RequestPayload {
	Describe,
	Invoke(InvokeRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeRequest {
	/// Fully qualified var: `<namespace>/<name>`
	pub var: String,
	#[serde(default)]
	pub args: Vec<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
	pub id: String,
	#[serde(flatten)]
	pub payload: ResponsePayload,
}

/// Discriminated by the `status` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponsePayload {
	Describe(DescribeResponse),
	Done(DoneResponse),
	Error(ErrorResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeResponse {
	pub format: String,
	pub namespaces: Vec<NamespaceDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDescription {
	pub name: String,
	pub vars: Vec<VarDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDescription {
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoneResponse {
	pub value: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub diagnostic: Diagnostic,
}

impl Response {
	pub fn done(id: impl Into<String>, value: JsonValue) -> Self {
		Self {
			id: id.into(),
			payload: ResponsePayload::Done(DoneResponse {
				value,
			}),
		}
	}

	pub fn error(id: impl Into<String>, diagnostic: Diagnostic) -> Self {
		Self {
			id: id.into(),
			payload: ResponsePayload::Error(ErrorResponse {
				diagnostic,
			}),
		}
	}

	pub fn describe(id: impl Into<String>, describe: DescribeResponse) -> Self {
		Self {
			id: id.into(),
			payload: ResponsePayload::Describe(describe),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_parse_describe() {
		let request: Request = serde_json::from_str(r#"{"id": "1", "op": "describe"}"#).unwrap();
		assert_eq!(request.id, "1");
		assert_eq!(request.payload, RequestPayload::Describe);
	}

	#[test]
	fn test_parse_invoke() {
		let request: Request = serde_json::from_str(
			r#"{"id": "2", "op": "invoke", "var": "netpod.jlabath.bigquery/query-token", "args": ["SELECT 1", "", 10]}"#,
		)
		.unwrap();
		let RequestPayload::Invoke(invoke) = request.payload else {
			panic!("expected invoke");
		};
		assert_eq!(invoke.var, "netpod.jlabath.bigquery/query-token");
		assert_eq!(invoke.args, vec![json!("SELECT 1"), json!(""), json!(10)]);
	}

	#[test]
	fn test_parse_invoke_without_args() {
		let request: Request = serde_json::from_str(r#"{"id": "3", "op": "invoke", "var": "a/b"}"#).unwrap();
		assert!(matches!(request.payload, RequestPayload::Invoke(InvokeRequest { ref args, .. }) if args.is_empty()));
	}

	#[test]
	fn test_unknown_op_is_rejected() {
		assert!(serde_json::from_str::<Request>(r#"{"id": "4", "op": "shutdown"}"#).is_err());
	}

	#[test]
	fn test_done_shape() {
		let response = Response::done("7", json!([[1, "a"]]));
		assert_eq!(serde_json::to_value(&response).unwrap(), json!({"id": "7", "status": "done", "value": [[1, "a"]]}));
	}

	#[test]
	fn test_error_shape() {
		let response = Response::error("8", Diagnostic::new("QUERY_002", "timed out"));
		let value = serde_json::to_value(&response).unwrap();
		assert_eq!(value["status"], "error");
		assert_eq!(value["diagnostic"]["code"], "QUERY_002");
	}

	#[test]
	fn test_describe_shape() {
		let response = Response::describe(
			"9",
			DescribeResponse {
				format: FORMAT.to_string(),
				namespaces: vec![NamespaceDescription {
					name: "ns".to_string(),
					vars: vec![VarDescription {
						name: "query".to_string(),
					}],
				}],
			},
		);
		assert_eq!(
			serde_json::to_value(&response).unwrap(),
			json!({"id": "9", "status": "describe", "format": "json", "namespaces": [{"name": "ns", "vars": [{"name": "query"}]}]})
		);
	}
}
