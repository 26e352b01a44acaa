// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;
use crate::value::Type;

pub fn type_mismatch(column: &str, expected: &Type, actual: &str) -> Diagnostic {
	Diagnostic {
		code: "ENCODE_001".to_string(),
		message: format!("Failed to convert field {} to json: expected {} but got {}", column, expected, actual),
		column: Some(column.to_string()),
		label: Some(format!("declared as {}", expected)),
		help: Some("the data source returned a value that does not match the column's declared type".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn unsupported_type(column: &str, ty: &Type) -> Diagnostic {
	Diagnostic {
		code: "ENCODE_002".to_string(),
		message: format!("Unsure how to convert field {} and type {}", column, ty),
		column: Some(column.to_string()),
		label: Some(format!("unsupported type {}", ty)),
		help: Some(format!("CAST the column to STRING or a supported type: {}", Type::SUPPORTED_NAMES.join(", "))),
		notes: vec![],
		cause: None,
	}
}

pub fn non_finite_float(column: &str, value: f64) -> Diagnostic {
	Diagnostic {
		code: "ENCODE_003".to_string(),
		message: format!("Failed to convert field {} to json: {} has no JSON number form", column, value),
		column: Some(column.to_string()),
		label: None,
		help: Some("filter out NaN and infinite values or CAST the column to STRING".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn required_null(column: &str, ty: &Type) -> Diagnostic {
	Diagnostic {
		code: "ENCODE_004".to_string(),
		message: format!("Failed to convert field {} to json: required {} column is null", column, ty),
		column: Some(column.to_string()),
		label: Some("REQUIRED".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}
