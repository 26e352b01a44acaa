// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::DispatchError;

/// Decodes positional arguments into `T`, usually a tuple.
///
/// ```ignore
/// let (sql, token, page_size): (String, String, i64) = decode_args(args)?;
/// ```
pub fn decode_args<T: DeserializeOwned>(args: Vec<JsonValue>) -> Result<T, DispatchError> {
	serde_json::from_value(JsonValue::Array(args)).map_err(|e| DispatchError::InvalidArgs(e.to_string()))
}
