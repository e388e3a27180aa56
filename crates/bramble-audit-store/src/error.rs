// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// A query failed shape validation before reaching the database.
	#[error("invalid query: {0}")]
	InvalidQuery(String),

	/// The database rejected or failed the operation. Not retried here;
	/// callers decide whether to surface or log and continue.
	#[error("audit store unavailable: {0}")]
	Unavailable(#[from] sqlx::Error),

	/// A stored row could not be decoded back into an event.
	#[error("corrupt audit record: {0}")]
	Corrupt(String),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
