// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Serving one client connection.
//!
//! Requests are read line by line. Every invoke runs in its own task and
//! answers through a shared writer task, so a slow query never holds up the
//! requests behind it. Responses may therefore arrive out of order; clients
//! match them by id.
//!
//! When the client goes away, its in-flight invokes are aborted. On server
//! shutdown they are allowed to finish and their responses are written.

use std::{collections::HashMap, sync::Arc};

use bqpod_type::{IntoDiagnostic, diagnostic::internal};
use serde_json::Value as JsonValue;
use tokio::{
	io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
	net::{UnixStream, unix::OwnedWriteHalf},
	sync::{Semaphore, mpsc, watch},
	task::{self, JoinError, JoinSet},
};

use crate::{
	error::DispatchError,
	protocol::{InvokeRequest, Request, RequestPayload, Response},
	registry::Registry,
};

/// Invokes running on one connection, keyed back to their request ids.
struct Invocations {
	tasks: JoinSet<Response>,
	ids: HashMap<task::Id, String>,
	permits: Arc<Semaphore>,
	limit: usize,
}

impl Invocations {
	fn new(limit: usize) -> Self {
		Self {
			tasks: JoinSet::new(),
			ids: HashMap::new(),
			permits: Arc::new(Semaphore::new(limit)),
			limit,
		}
	}

	fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Response for a finished task. `None` for a task that was aborted.
	fn complete(&mut self, result: Result<(task::Id, Response), JoinError>) -> Option<Response> {
		match result {
			Ok((task_id, response)) => {
				self.ids.remove(&task_id);
				Some(response)
			}
			Err(e) => {
				let id = self.ids.remove(&e.id()).unwrap_or_default();
				if e.is_cancelled() {
					return None;
				}
				tracing::error!("invoke {} task failed: {}", id, e);
				Some(Response::error(id, internal(format!("handler task failed: {}", e))))
			}
		}
	}
}

pub async fn handle_connection(
	stream: UnixStream,
	registry: Arc<Registry>,
	max_in_flight: usize,
	mut shutdown: watch::Receiver<bool>,
) {
	let (read_half, write_half) = stream.into_split();
	let (tx, rx) = mpsc::unbounded_channel();
	let writer = tokio::spawn(write_responses(write_half, rx));

	let mut lines = BufReader::new(read_half).lines();
	let mut invocations = Invocations::new(max_in_flight);
	let mut client_gone = false;

	loop {
		tokio::select! {
			biased;

			result = shutdown.changed() => {
				if result.is_err() || *shutdown.borrow() {
					break;
				}
			}

			Some(result) = invocations.tasks.join_next_with_id(), if !invocations.is_empty() => {
				if let Some(response) = invocations.complete(result) {
					let _ = tx.send(response);
				}
			}

			line = lines.next_line() => {
				match line {
					Ok(Some(line)) => {
						if !line.trim().is_empty() {
							dispatch(&line, &registry, &tx, &mut invocations);
						}
					}
					Ok(None) => {
						client_gone = true;
						break;
					}
					Err(e) => {
						tracing::warn!("Connection read error: {}", e);
						client_gone = true;
						break;
					}
				}
			}
		}
	}

	if client_gone {
		if !invocations.is_empty() {
			tracing::debug!("Client disconnected, aborting {} invokes", invocations.tasks.len());
		}
		invocations.tasks.abort_all();
		while invocations.tasks.join_next().await.is_some() {}
	} else {
		while let Some(result) = invocations.tasks.join_next_with_id().await {
			if let Some(response) = invocations.complete(result) {
				let _ = tx.send(response);
			}
		}
	}

	drop(tx);
	let _ = writer.await;
}

fn dispatch(line: &str, registry: &Arc<Registry>, tx: &mpsc::UnboundedSender<Response>, invocations: &mut Invocations) {
	let request = match serde_json::from_str::<Request>(line) {
		Ok(request) => request,
		Err(e) => {
			let id = request_id(line);
			tracing::warn!("Malformed request {:?}: {}", id, e);
			let _ = tx.send(Response::error(id, DispatchError::MalformedRequest(e.to_string()).into_diagnostic()));
			return;
		}
	};

	match request.payload {
		RequestPayload::Describe => {
			tracing::debug!("describe {}", request.id);
			let _ = tx.send(Response::describe(request.id, registry.describe()));
		}
		RequestPayload::Invoke(invoke) => {
			let id = request.id;
			let Ok(permit) = invocations.permits.clone().try_acquire_owned() else {
				tracing::warn!("Rejecting invoke {}: {} already in flight", id, invocations.limit);
				let error = DispatchError::Busy {
					limit: invocations.limit,
				};
				let _ = tx.send(Response::error(id, error.into_diagnostic()));
				return;
			};

			let InvokeRequest {
				var,
				args,
			} = invoke;
			tracing::debug!("invoke {} {}", id, var);

			let registry = registry.clone();
			let task_id = id.clone();
			let handle = invocations.tasks.spawn(async move {
				let _permit = permit;
				match registry.invoke(&var, args).await {
					Ok(value) => Response::done(task_id, value),
					Err(err) => {
						tracing::debug!("invoke {} failed: {}", task_id, err);
						Response::error(task_id, err.diagnostic())
					}
				}
			});
			invocations.ids.insert(handle.id(), id);
		}
	}
}

/// Best-effort id of a request that failed to parse, so the error can still
/// be correlated.
fn request_id(line: &str) -> String {
	serde_json::from_str::<JsonValue>(line)
		.ok()
		.and_then(|value| value.get("id").and_then(JsonValue::as_str).map(str::to_string))
		.unwrap_or_default()
}

async fn write_responses(mut writer: OwnedWriteHalf, mut rx: mpsc::UnboundedReceiver<Response>) {
	while let Some(response) = rx.recv().await {
		let mut bytes = match serde_json::to_vec(&response) {
			Ok(bytes) => bytes,
			Err(e) => {
				tracing::error!("Failed to serialize response {}: {}", response.id, e);
				continue;
			}
		};
		bytes.push(b'\n');
		if let Err(e) = writer.write_all(&bytes).await {
			tracing::debug!("Connection write error: {}", e);
			break;
		}
	}
	let _ = writer.shutdown().await;
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use async_trait::async_trait;
	use bqpod_type::Error;

	use super::*;
	use crate::registry::{Handler, Namespace, Var};

	struct Panics;

	#[async_trait]
	impl Handler for Panics {
		async fn call(&self, _args: Vec<JsonValue>) -> Result<JsonValue, Error> {
			panic!("handler bug");
		}
	}

	struct Sleeps;

	#[async_trait]
	impl Handler for Sleeps {
		async fn call(&self, _args: Vec<JsonValue>) -> Result<JsonValue, Error> {
			tokio::time::sleep(Duration::from_secs(30)).await;
			Ok(JsonValue::Null)
		}
	}

	fn registry() -> Arc<Registry> {
		Arc::new(Registry::new().with_namespace(
			Namespace::new("test").with_var(Var::new("panic", Panics)).with_var(Var::new("sleep", Sleeps)),
		))
	}

	async fn next_response(invocations: &mut Invocations) -> Option<Response> {
		let result = invocations.tasks.join_next_with_id().await?;
		invocations.complete(result)
	}

	#[test]
	fn test_request_id_of_malformed_line() {
		assert_eq!(request_id(r#"{"id": "5", "op": "nope"}"#), "5");
		assert_eq!(request_id(r#"{"id": 5}"#), "");
		assert_eq!(request_id("not json"), "");
	}

	#[tokio::test]
	async fn test_panicking_handler_is_internal_error() {
		let (tx, _rx) = mpsc::unbounded_channel();
		let mut invocations = Invocations::new(4);
		dispatch(r#"{"id": "p", "op": "invoke", "var": "test/panic"}"#, &registry(), &tx, &mut invocations);

		let response = next_response(&mut invocations).await.unwrap();
		assert_eq!(response.id, "p");
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["diagnostic"]["code"], "INTERNAL_001");
		assert!(invocations.ids.is_empty());
	}

	#[tokio::test]
	async fn test_in_flight_limit() {
		let (tx, mut rx) = mpsc::unbounded_channel();
		let mut invocations = Invocations::new(2);
		let registry = registry();
		for i in 0..3 {
			let line = format!(r#"{{"id": "s{}", "op": "invoke", "var": "test/sleep"}}"#, i);
			dispatch(&line, &registry, &tx, &mut invocations);
		}

		assert_eq!(invocations.tasks.len(), 2);
		let rejected = rx.try_recv().unwrap();
		assert_eq!(rejected.id, "s2");
		let json = serde_json::to_value(&rejected).unwrap();
		assert_eq!(json["diagnostic"]["code"], "DISPATCH_004");
	}

	#[tokio::test]
	async fn test_aborted_invoke_has_no_response() {
		let (tx, _rx) = mpsc::unbounded_channel();
		let mut invocations = Invocations::new(1);
		dispatch(r#"{"id": "a", "op": "invoke", "var": "test/sleep"}"#, &registry(), &tx, &mut invocations);

		invocations.tasks.abort_all();
		assert!(next_response(&mut invocations).await.is_none());
		assert!(invocations.ids.is_empty());
		assert_eq!(invocations.permits.available_permits(), 1);
	}
}
