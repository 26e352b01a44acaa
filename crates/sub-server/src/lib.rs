// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pod server for bqpod.
//!
//! Exposes the query operations as vars of the `netpod.jlabath.bigquery`
//! namespace over a Unix domain socket.
//!
//! # Message Protocol
//!
//! Newline-delimited JSON, one object per line:
//!
//! ```json
//! {"id": "1", "op": "describe"}
//! {"id": "2", "op": "invoke", "var": "netpod.jlabath.bigquery/query", "args": ["SELECT 1"]}
//! ```
//!
//! Responses echo the id and carry a `status` of `describe`, `done` or
//! `error`.

pub mod args;
pub mod config;
pub mod connection;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod subsystem;

pub use args::decode_args;
pub use config::ServerConfig;
pub use error::{DispatchError, ServerError};
pub use handlers::{NAMESPACE, QueryHandler, QueryTokenHandler, query_namespace};
pub use protocol::{Request, RequestPayload, Response, ResponsePayload};
pub use registry::{Handler, Namespace, Registry, Var};
pub use subsystem::PodServer;
