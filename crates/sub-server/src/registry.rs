// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use bqpod_type::Error;
use serde_json::Value as JsonValue;

use crate::{
	error::DispatchError,
	protocol::{DescribeResponse, FORMAT, NamespaceDescription, VarDescription},
};

/// Implementation of one invokable var.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn call(&self, args: Vec<JsonValue>) -> Result<JsonValue, Error>;
}

#[derive(Clone)]
pub struct Var {
	pub name: String,
	pub handler: Arc<dyn Handler>,
}

impl Var {
	pub fn new(name: impl Into<String>, handler: impl Handler + 'static) -> Self {
		Self {
			name: name.into(),
			handler: Arc::new(handler),
		}
	}
}

#[derive(Clone)]
pub struct Namespace {
	pub name: String,
	pub vars: Vec<Var>,
}

impl Namespace {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			vars: vec![],
		}
	}

	pub fn with_var(mut self, var: Var) -> Self {
		self.vars.push(var);
		self
	}
}

/// Every namespace the pod exposes. Immutable once the server starts.
#[derive(Clone, Default)]
pub struct Registry {
	namespaces: Vec<Namespace>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_namespace(mut self, namespace: Namespace) -> Self {
		self.namespaces.push(namespace);
		self
	}

	pub fn describe(&self) -> DescribeResponse {
		DescribeResponse {
			format: FORMAT.to_string(),
			namespaces: self
				.namespaces
				.iter()
				.map(|ns| NamespaceDescription {
					name: ns.name.clone(),
					vars: ns
						.vars
						.iter()
						.map(|var| VarDescription {
							name: var.name.clone(),
						})
						.collect(),
				})
				.collect(),
		}
	}

	/// Resolves `<namespace>/<name>`. Namespace names contain dots but never
	/// slashes, so the first slash separates the two.
	pub fn lookup(&self, var: &str) -> Result<Arc<dyn Handler>, DispatchError> {
		let unknown = || DispatchError::UnknownVar(var.to_string());
		let (namespace, name) = var.split_once('/').ok_or_else(unknown)?;

		self.namespaces
			.iter()
			.filter(|ns| ns.name == namespace)
			.flat_map(|ns| ns.vars.iter())
			.find(|v| v.name == name)
			.map(|v| v.handler.clone())
			.ok_or_else(unknown)
	}

	pub async fn invoke(&self, var: &str, args: Vec<JsonValue>) -> Result<JsonValue, Error> {
		let handler = self.lookup(var)?;
		handler.call(args).await
	}
}
