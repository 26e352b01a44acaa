// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_MAX_CONNECTIONS: usize = 64;
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub socket_path: PathBuf,
	pub max_connections: usize,
	/// Invokes one connection may have running at once
	pub max_in_flight: usize,
	/// How long shutdown waits for open connections to finish
	pub shutdown_timeout: Duration,
}

impl ServerConfig {
	pub fn new(socket_path: impl Into<PathBuf>) -> Self {
		Self {
			socket_path: socket_path.into(),
			max_connections: DEFAULT_MAX_CONNECTIONS,
			max_in_flight: DEFAULT_MAX_IN_FLIGHT,
			shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
		}
	}

	pub fn with_max_connections(mut self, max_connections: usize) -> Self {
		self.max_connections = max_connections;
		self
	}

	pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
		self.max_in_flight = max_in_flight;
		self
	}
}
