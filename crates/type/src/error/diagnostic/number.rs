// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;
use crate::value::Type;

pub fn invalid_number_format(text: &str, ty: Type) -> Diagnostic {
	Diagnostic {
		code: "NUMBER_001".to_string(),
		message: format!("invalid {} value '{}'", ty, text),
		column: None,
		label: Some(format!("not a valid {}", ty)),
		help: None,
		notes: vec![],
		cause: None,
	}
}
