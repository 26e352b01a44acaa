// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod error;
pub mod value;

pub use error::{
	Error, IntoDiagnostic,
	diagnostic::{self, Diagnostic},
};
pub use value::{Date, DateTime, Decimal, Mode, Time, Timestamp, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
