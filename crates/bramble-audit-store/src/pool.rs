// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};
use std::str::FromStr;

use crate::error::Result;

/// Create a SqlitePool with WAL mode and common settings.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./bramble.db")
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
	let options = SqliteConnectOptions::from_str(database_url)?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.create_if_missing(true);

	let pool = SqlitePool::connect_with(options).await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn creates_missing_database_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("audit.db");
		let url = format!("sqlite:{}", path.display());

		let pool = create_pool(&url).await.unwrap();
		sqlx::query("SELECT 1").execute(&pool).await.unwrap();

		assert!(path.exists());
	}

	#[tokio::test]
	async fn surfaces_connect_errors() {
		// create_if_missing creates the file, never its parent directories.
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing").join("audit.db");
		let url = format!("sqlite:{}", path.display());

		let result = create_pool(&url).await;
		assert!(result.is_err());
	}
}
