// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, sync::Arc, time::Duration};

use bqpod_core::{Field, QueryConfig, Type, Value};
use bqpod_sub_server::{PodServer, Registry, ServerConfig, query_namespace};
use bqpod_testing::{
	MemorySource, TempDir,
	util::wait::{wait_for, wait_for_path},
};
use serde_json::{Value as JsonValue, json};
use tokio::{
	io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
	net::{
		UnixStream,
		unix::{OwnedReadHalf, OwnedWriteHalf},
	},
	time::{sleep, timeout},
};

const QUERY: &str = "netpod.jlabath.bigquery/query";
const QUERY_TOKEN: &str = "netpod.jlabath.bigquery/query-token";

fn source() -> MemorySource {
	let rows = (1..=5).map(|i| vec![Value::int(i), Value::utf8(format!("name{}", i))]).collect();
	MemorySource::new().with_table(
		"SELECT id, name FROM people",
		vec![Field::new("id", Type::Integer).required(), Field::new("name", Type::String)],
		rows,
	)
}

async fn start(dir: &TempDir, source: MemorySource, query: QueryConfig) -> PodServer {
	start_with_config(ServerConfig::new(dir.socket_path()), source, query).await
}

async fn start_with_config(config: ServerConfig, source: MemorySource, query: QueryConfig) -> PodServer {
	let registry = Registry::new().with_namespace(query_namespace(Arc::new(source), query));
	let mut server = PodServer::new(config, registry);
	server.start().await.unwrap();
	wait_for_path(server.socket_path()).await;
	server
}

fn slow_source(rows: i64, delay: Duration) -> MemorySource {
	let rows = (1..=rows).map(|i| vec![Value::int(i), Value::utf8(format!("name{}", i))]).collect();
	MemorySource::new()
		.with_table(
			"SELECT id, name FROM people",
			vec![Field::new("id", Type::Integer).required(), Field::new("name", Type::String)],
			rows,
		)
		.with_pull_delay(delay)
}

struct Client {
	lines: Lines<BufReader<OwnedReadHalf>>,
	writer: OwnedWriteHalf,
}

impl Client {
	async fn connect(dir: &TempDir) -> Self {
		let stream = UnixStream::connect(dir.socket_path()).await.unwrap();
		let (read, writer) = stream.into_split();
		Self {
			lines: BufReader::new(read).lines(),
			writer,
		}
	}

	async fn send_line(&mut self, line: &str) {
		self.writer.write_all(line.as_bytes()).await.unwrap();
		self.writer.write_all(b"\n").await.unwrap();
	}

	async fn send(&mut self, request: JsonValue) {
		self.send_line(&request.to_string()).await;
	}

	async fn recv(&mut self) -> JsonValue {
		let line = timeout(Duration::from_secs(5), self.lines.next_line()).await.unwrap().unwrap().unwrap();
		serde_json::from_str(&line).unwrap()
	}

	async fn invoke(&mut self, id: &str, var: &str, args: JsonValue) -> JsonValue {
		self.send(json!({"id": id, "op": "invoke", "var": var, "args": args})).await;
		let response = self.recv().await;
		assert_eq!(response["id"], id);
		response
	}
}

#[tokio::test]
async fn test_describe() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	client.send(json!({"id": "d1", "op": "describe"})).await;
	assert_eq!(
		client.recv().await,
		json!({
			"id": "d1",
			"status": "describe",
			"format": "json",
			"namespaces": [{"name": "netpod.jlabath.bigquery", "vars": [{"name": "query"}, {"name": "query-token"}]}]
		})
	);

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_query() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	let response = client.invoke("q1", QUERY, json!(["SELECT id, name FROM people"])).await;
	assert_eq!(response["status"], "done");
	assert_eq!(response["value"], json!([[1, "name1"], [2, "name2"], [3, "name3"], [4, "name4"], [5, "name5"]]));

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_query_token_pages() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;
	let sql = "SELECT id, name FROM people";

	let mut token = String::new();
	let mut sizes = vec![];
	for i in 0..3 {
		let response = client.invoke(&format!("p{}", i), QUERY_TOKEN, json!([sql, token, 2])).await;
		assert_eq!(response["status"], "done");
		sizes.push(response["value"]["rows"].as_array().unwrap().len());
		token = response["value"]["token"].as_str().unwrap().to_string();
	}
	assert_eq!(sizes, vec![2, 2, 1]);
	assert_eq!(token, "");

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_call_keeps_connection_serving() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	let response = client.invoke("e1", QUERY, json!(["SELECT nothing"])).await;
	assert_eq!(response["status"], "error");
	assert_eq!(response["diagnostic"]["code"], "QUERY_001");

	let response = client.invoke("e2", "netpod.jlabath.bigquery/drop-table", json!([])).await;
	assert_eq!(response["diagnostic"]["code"], "DISPATCH_001");

	let response = client.invoke("e3", QUERY_TOKEN, json!(["SELECT id, name FROM people"])).await;
	assert_eq!(response["diagnostic"]["code"], "DISPATCH_002");

	let response = client.invoke("e4", QUERY_TOKEN, json!(["SELECT id, name FROM people", "", 0])).await;
	assert_eq!(response["diagnostic"]["code"], "QUERY_004");

	let response = client.invoke("ok", QUERY, json!(["SELECT id, name FROM people"])).await;
	assert_eq!(response["status"], "done");

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_request() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	client.send_line(r#"{"id": "m1", "op": "launch"}"#).await;
	let response = client.recv().await;
	assert_eq!(response["id"], "m1");
	assert_eq!(response["diagnostic"]["code"], "DISPATCH_003");

	client.send_line("this is not json").await;
	let response = client.recv().await;
	assert_eq!(response["id"], "");
	assert_eq!(response["status"], "error");

	client.send(json!({"id": "d2", "op": "describe"})).await;
	assert_eq!(client.recv().await["status"], "describe");

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_slow_invoke_does_not_block_connection() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source().with_pull_delay(Duration::from_millis(100)), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	client.send(json!({"id": "slow", "op": "invoke", "var": QUERY, "args": ["SELECT id, name FROM people"]})).await;
	client.send(json!({"id": "fast", "op": "describe"})).await;

	assert_eq!(client.recv().await["id"], "fast");
	let slow = client.recv().await;
	assert_eq!(slow["id"], "slow");
	assert_eq!(slow["status"], "done");

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_query_timeout() {
	let dir = TempDir::new().unwrap();
	let config = QueryConfig::default().with_timeout(Duration::from_millis(50));
	let mut server = start(&dir, source().with_pull_delay(Duration::from_millis(200)), config).await;
	let mut client = Client::connect(&dir).await;

	let response = client.invoke("t1", QUERY, json!(["SELECT id, name FROM people"])).await;
	assert_eq!(response["status"], "error");
	assert_eq!(response["diagnostic"]["code"], "QUERY_002");
	assert!(response.get("value").is_none());

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_disconnect_aborts_in_flight_query() {
	let dir = TempDir::new().unwrap();
	let source = slow_source(20, Duration::from_millis(50));
	let mut server = start(&dir, source.clone(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	client.send(json!({"id": "gone", "op": "invoke", "var": QUERY, "args": ["SELECT id, name FROM people"]})).await;
	wait_for(|| source.pulls() > 0, "query should start pulling").await;
	sleep(Duration::from_millis(100)).await;
	drop(client);

	wait_for(|| server.active_connections() == 0, "connection should close").await;
	let pulls = source.pulls();
	assert!(pulls < 20);

	sleep(Duration::from_millis(500)).await;
	assert_eq!(source.pulls(), pulls);

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_in_flight_limit_per_connection() {
	let dir = TempDir::new().unwrap();
	let config = ServerConfig::new(dir.socket_path()).with_max_in_flight(2);
	let mut server =
		start_with_config(config, slow_source(5, Duration::from_millis(50)), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	for id in ["f1", "f2", "f3"] {
		client.send(json!({"id": id, "op": "invoke", "var": QUERY, "args": ["SELECT id, name FROM people"]})).await;
	}

	let rejected = client.recv().await;
	assert_eq!(rejected["id"], "f3");
	assert_eq!(rejected["status"], "error");
	assert_eq!(rejected["diagnostic"]["code"], "DISPATCH_004");

	let mut done = vec![];
	for _ in 0..2 {
		let response = client.recv().await;
		assert_eq!(response["status"], "done");
		done.push(response["id"].as_str().unwrap().to_string());
	}
	done.sort();
	assert_eq!(done, vec!["f1", "f2"]);

	let response = client.invoke("f4", QUERY, json!(["SELECT id, name FROM people"])).await;
	assert_eq!(response["status"], "done");

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_finishes_in_flight_query() {
	let dir = TempDir::new().unwrap();
	let source = slow_source(5, Duration::from_millis(20));
	let mut server = start(&dir, source.clone(), QueryConfig::default()).await;
	let mut client = Client::connect(&dir).await;

	client.send(json!({"id": "late", "op": "invoke", "var": QUERY, "args": ["SELECT id, name FROM people"]})).await;
	wait_for(|| source.pulls() > 0, "query should start pulling").await;
	server.shutdown().await.unwrap();

	let response = client.recv().await;
	assert_eq!(response["id"], "late");
	assert_eq!(response["status"], "done");
	assert_eq!(response["value"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_concurrent_connections() {
	let dir = TempDir::new().unwrap();
	let mut server = start(&dir, source(), QueryConfig::default()).await;

	let mut clients = vec![];
	for _ in 0..4 {
		clients.push(Client::connect(&dir).await);
	}
	wait_for(|| server.active_connections() == 4, "all clients should be connected").await;

	let mut handles = vec![];
	for (i, mut client) in clients.into_iter().enumerate() {
		handles.push(tokio::spawn(async move {
			let id = format!("c{}", i);
			client.invoke(&id, QUERY, json!(["SELECT id, name FROM people"])).await
		}));
	}

	for handle in handles {
		let response = handle.await.unwrap();
		assert_eq!(response["value"].as_array().unwrap().len(), 5);
	}

	server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stale_socket_replaced_and_removed() {
	let dir = TempDir::new().unwrap();
	fs::write(dir.socket_path(), b"stale").unwrap();

	let mut server = start(&dir, source(), QueryConfig::default()).await;
	assert!(server.is_running());
	let mut client = Client::connect(&dir).await;
	client.send(json!({"id": "s", "op": "describe"})).await;
	assert_eq!(client.recv().await["status"], "describe");
	drop(client);

	server.shutdown().await.unwrap();
	assert!(!dir.socket_path().exists());
	assert!(!server.is_running());
}
