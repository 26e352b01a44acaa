// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Core of bqpod: turns schema-typed result rows into JSON and drives a data
//! source's row iterator for full scans and resumable pages.
//!
//! The data source itself is abstracted behind [`DataSource`] and
//! [`RowIterator`]; this crate never talks to a network.

pub mod encode;
pub mod error;
pub mod query;
pub mod row;
pub mod schema;
pub mod source;

pub use bqpod_type::{self as r#type, Diagnostic, Error, Mode, Type, Value};
pub use encode::encode;
pub use error::QueryError;
pub use query::{QueryConfig, QueryPage, fetch_all, fetch_page, query_all, query_page};
pub use row::{Column, Row};
pub use schema::{Field, Schema};
pub use source::{DataSource, RowIterator};

pub type Result<T> = std::result::Result<T, Error>;
