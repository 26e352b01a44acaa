// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

pub fn invalid_date(text: &str) -> Diagnostic {
	Diagnostic {
		code: "TEMPORAL_001".to_string(),
		message: format!("invalid date '{}'", text),
		column: None,
		label: None,
		help: Some("use the format YYYY-MM-DD".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_time(text: &str) -> Diagnostic {
	Diagnostic {
		code: "TEMPORAL_002".to_string(),
		message: format!("invalid time '{}'", text),
		column: None,
		label: None,
		help: Some("use the format HH:MM:SS[.ffffff]".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_datetime(text: &str) -> Diagnostic {
	Diagnostic {
		code: "TEMPORAL_003".to_string(),
		message: format!("invalid datetime '{}'", text),
		column: None,
		label: None,
		help: Some("use the format YYYY-MM-DDTHH:MM:SS[.ffffff]".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_timestamp(text: &str) -> Diagnostic {
	Diagnostic {
		code: "TEMPORAL_004".to_string(),
		message: format!("invalid timestamp '{}'", text),
		column: None,
		label: None,
		help: Some("use RFC 3339 (YYYY-MM-DDTHH:MM:SS[.ffffff]Z) or microseconds since the Unix epoch".to_string()),
		notes: vec![],
		cause: None,
	}
}
