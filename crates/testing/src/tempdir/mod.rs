// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Temporary directory removed on drop. Usable across `.await` points.
#[derive(Debug)]
pub struct TempDir {
	path: PathBuf,
}

impl TempDir {
	pub fn new() -> std::io::Result<Self> {
		let mut path = env::temp_dir();
		// Unix socket paths are limited to ~100 bytes, keep this short
		path.push(format!("bqpod-{}", Uuid::new_v4().simple()));
		fs::create_dir(&path)?;
		Ok(Self {
			path,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Path of a socket file inside this directory.
	pub fn socket_path(&self) -> PathBuf {
		self.path.join("pod.sock")
	}
}

impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_removed_on_drop() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().to_path_buf();
		assert!(path.is_dir());
		drop(dir);
		assert!(!path.exists());
	}
}
