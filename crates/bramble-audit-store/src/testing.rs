// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Test helpers for crates that exercise the audit store.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::schema::run_migrations;

/// Create an in-memory pool with the audit schema applied.
///
/// The pool is capped at one connection: every connection to
/// `:memory:` opens its own private database, so a larger pool would
/// scatter writes across invisible databases.
pub async fn create_audit_test_pool() -> SqlitePool {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect(":memory:")
		.await
		.expect("Failed to create in-memory pool");

	run_migrations(&pool)
		.await
		.expect("Failed to apply audit schema");

	pool
}
