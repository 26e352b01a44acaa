// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! BigQuery data source for bqpod, talking to the v2 REST API.
//!
//! Queries are submitted with `jobs.query` and read back page by page with
//! `jobs.getQueryResults`. Continuation tokens name the job and the row
//! offset, so a page can be resumed from a fresh call.

pub mod api;
mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod token;

pub use client::{BigQueryClient, BigQueryRowIterator};
pub use config::BigQueryConfig;
pub use error::BigQueryError;
pub use token::PageToken;
