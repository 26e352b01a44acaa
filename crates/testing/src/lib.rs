// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod memory;
pub mod tempdir;
pub mod util;

pub use memory::MemorySource;
pub use tempdir::TempDir;
