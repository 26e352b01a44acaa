// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use bqpod_bigquery::{BigQueryClient, BigQueryConfig, BigQueryError};
use bqpod_core::QueryConfig;
use bqpod_sub_server::{
	PodServer, Registry, ServerConfig, ServerError,
	config::{DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_IN_FLIGHT, DEFAULT_QUERY_TIMEOUT},
	query_namespace,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bqpod-server", version, about = "Serve BigQuery queries over a Unix domain socket")]
struct Args {
	/// Path of the Unix domain socket to listen on
	#[arg(value_name = "SOCKET_PATH")]
	socket_path: PathBuf,

	/// Wall-clock limit per query call, in seconds
	#[arg(
		long,
		env = "BQPOD_TIMEOUT_SECS",
		default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs(),
		value_parser = clap::value_parser!(u64).range(1..),
	)]
	timeout_secs: u64,

	/// Refuse full scans that return more rows than this
	#[arg(long, env = "BQPOD_MAX_ROWS")]
	max_rows: Option<usize>,

	#[arg(long, env = "BQPOD_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
	max_connections: usize,

	/// Invokes a single connection may have running at once
	#[arg(long, env = "BQPOD_MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
	max_in_flight: usize,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
	#[error(transparent)]
	BigQuery(#[from] BigQueryError),

	#[error(transparent)]
	Server(#[from] ServerError),

	#[error("failed to wait for shutdown signal: {0}")]
	Signal(#[source] std::io::Error),
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

	let result = match std::env::var("BQPOD_LOG_FORMAT") {
		Ok(format) if format.eq_ignore_ascii_case("json") => builder.json().try_init(),
		_ => builder.try_init(),
	};
	if let Err(e) = result {
		eprintln!("failed to initialize logging: {}", e);
	}
}

async fn run(args: Args) -> Result<(), StartupError> {
	let bigquery = BigQueryConfig::from_env()?;
	tracing::info!("Using BigQuery project {}", bigquery.project);
	let client = BigQueryClient::new(bigquery)?;

	let mut query = QueryConfig::default().with_timeout(Duration::from_secs(args.timeout_secs));
	if let Some(max_rows) = args.max_rows {
		query = query.with_max_rows(max_rows);
	}

	let registry = Registry::new().with_namespace(query_namespace(Arc::new(client), query));
	let config = ServerConfig::new(args.socket_path)
		.with_max_connections(args.max_connections)
		.with_max_in_flight(args.max_in_flight);

	let mut server = PodServer::new(config, registry);
	server.start().await?;

	let signal = tokio::signal::ctrl_c().await;
	tracing::info!("Shutdown requested");
	server.shutdown().await?;
	signal.map_err(StartupError::Signal)
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();
	init_tracing();

	match run(args).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!("{}", e);
			ExitCode::FAILURE
		}
	}
}
