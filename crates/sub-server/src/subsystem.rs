// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Unix socket server lifecycle: bind, accept, shut down and drain.

use std::{
	fs, io,
	path::Path,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use tokio::{
	net::UnixListener,
	spawn,
	sync::{Semaphore, watch},
	task::JoinHandle,
	time::{Instant, sleep},
};

use crate::{config::ServerConfig, connection::handle_connection, error::ServerError, registry::Registry};

/// Pod server listening on a Unix domain socket.
///
/// - Connection limiting via semaphore
/// - Graceful shutdown with connection draining
/// - Stale socket files are replaced on start and removed on shutdown
pub struct PodServer {
	config: ServerConfig,
	registry: Arc<Registry>,
	/// Flag indicating if the server is running.
	running: Arc<AtomicBool>,
	/// Count of active connections.
	active_connections: Arc<AtomicUsize>,
	/// Channel to send shutdown signal.
	shutdown_tx: Option<watch::Sender<bool>>,
	/// Semaphore for connection limiting.
	connection_semaphore: Arc<Semaphore>,
	accept_task: Option<JoinHandle<()>>,
}

impl PodServer {
	pub fn new(config: ServerConfig, registry: Registry) -> Self {
		let max_connections = config.max_connections;
		Self {
			config,
			registry: Arc::new(registry),
			running: Arc::new(AtomicBool::new(false)),
			active_connections: Arc::new(AtomicUsize::new(0)),
			shutdown_tx: None,
			connection_semaphore: Arc::new(Semaphore::new(max_connections)),
			accept_task: None,
		}
	}

	pub fn socket_path(&self) -> &Path {
		&self.config.socket_path
	}

	/// Get the current number of active connections.
	pub fn active_connections(&self) -> usize {
		self.active_connections.load(Ordering::SeqCst)
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	pub async fn start(&mut self) -> Result<(), ServerError> {
		// Idempotent: if already running, return success
		if self.running.load(Ordering::SeqCst) {
			return Ok(());
		}

		remove_socket(self.socket_path())?;
		let listener = UnixListener::bind(self.socket_path()).map_err(|source| ServerError::Bind {
			path: self.socket_path().display().to_string(),
			source,
		})?;
		tracing::info!("Pod server listening on {}", self.socket_path().display());

		let (tx, mut rx) = watch::channel(false);
		let registry = self.registry.clone();
		let running = self.running.clone();
		let active_connections = self.active_connections.clone();
		let semaphore = self.connection_semaphore.clone();
		let max_in_flight = self.config.max_in_flight;

		running.store(true, Ordering::SeqCst);
		let accept_task = spawn(async move {
			let mut next_connection_id = 0u64;

			loop {
				tokio::select! {
					biased;

					// Check shutdown first
					result = rx.changed() => {
						if result.is_err() || *rx.borrow() {
							tracing::info!("Pod server shutting down");
							break;
						}
					}

					accept = listener.accept() => {
						match accept {
							Ok((stream, _)) => {
								next_connection_id += 1;
								let connection_id = next_connection_id;

								let permit = match semaphore.clone().try_acquire_owned() {
									Ok(p) => p,
									Err(_) => {
										tracing::warn!("Connection limit reached, rejecting connection {}", connection_id);
										continue;
									}
								};

								let registry = registry.clone();
								let shutdown_rx = rx.clone();
								let active = active_connections.clone();

								active.fetch_add(1, Ordering::SeqCst);
								tracing::debug!("Accepted connection {}", connection_id);

								spawn(async move {
									handle_connection(stream, registry, max_in_flight, shutdown_rx).await;
									active.fetch_sub(1, Ordering::SeqCst);
									drop(permit);
									tracing::debug!("Closed connection {}", connection_id);
								});
							}
							Err(e) => {
								tracing::warn!("Accept error: {}", e);
							}
						}
					}
				}
			}

			running.store(false, Ordering::SeqCst);
			tracing::info!("Pod server stopped");
		});

		self.shutdown_tx = Some(tx);
		self.accept_task = Some(accept_task);
		Ok(())
	}

	pub async fn shutdown(&mut self) -> Result<(), ServerError> {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(true);
		}
		if let Some(task) = self.accept_task.take() {
			let _ = task.await;
		}

		// Wait for active connections to drain (with timeout)
		let deadline = Instant::now() + self.config.shutdown_timeout;
		while self.active_connections.load(Ordering::SeqCst) > 0 {
			if Instant::now() > deadline {
				tracing::warn!(
					"Pod server shutdown timeout with {} connections still active",
					self.active_connections.load(Ordering::SeqCst)
				);
				break;
			}
			sleep(Duration::from_millis(10)).await;
		}

		remove_socket(self.socket_path())?;
		tracing::debug!("Pod server shutdown completed");
		Ok(())
	}
}

fn remove_socket(path: &Path) -> Result<(), ServerError> {
	match fs::remove_file(path) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
		Err(source) => Err(ServerError::RemoveSocket {
			path: path.display().to_string(),
			source,
		}),
	}
}
