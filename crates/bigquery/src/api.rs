// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Request and response bodies of the BigQuery v2 `jobs.query` and
//! `jobs.getQueryResults` calls. Only the fields bqpod reads are modelled.

use bqpod_core::{Field, Schema};
use bqpod_type::{Mode, Type};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
	pub query: String,
	pub use_legacy_sql: bool,
	pub max_results: u32,
	pub timeout_ms: u64,
	pub format_options: FormatOptions,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
	pub use_int64_timestamp: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
	pub job_reference: JobReference,
	#[serde(default)]
	pub job_complete: bool,
	pub schema: Option<TableSchema>,
	/// int64 encoded as a string
	pub total_rows: Option<String>,
	#[serde(default)]
	pub rows: Vec<TableRow>,
}

impl QueryResponse {
	pub fn total_rows(&self) -> Option<u64> {
		self.total_rows.as_deref().and_then(|rows| rows.parse().ok())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
	pub project_id: String,
	pub job_id: String,
	pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSchema {
	#[serde(default)]
	pub fields: Vec<TableFieldSchema>,
}

impl TableSchema {
	pub fn to_schema(&self) -> Schema {
		self.fields.iter().map(TableFieldSchema::to_field).collect()
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableFieldSchema {
	pub name: String,
	#[serde(rename = "type")]
	pub r#type: String,
	pub mode: Option<String>,
	#[serde(default)]
	pub fields: Vec<TableFieldSchema>,
}

impl TableFieldSchema {
	pub fn to_field(&self) -> Field {
		Field {
			name: self.name.clone(),
			r#type: Type::from_name(&self.r#type),
			mode: Mode::from_name(self.mode.as_deref()),
			fields: self.fields.iter().map(TableFieldSchema::to_field).collect(),
		}
	}
}

/// Row in the `f`/`v` format: `{"f": [{"v": ...}, ...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRow {
	#[serde(default)]
	pub f: Vec<TableCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableCell {
	#[serde(default)]
	pub v: JsonValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
	pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
	pub code: Option<u16>,
	pub message: String,
	pub status: Option<String>,
}
