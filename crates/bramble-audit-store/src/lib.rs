// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite-backed persistence for Bramble audit events.
//!
//! The [`AuditStore`] trait is the only seam consumers depend on;
//! [`SqliteAuditStore`] is the production implementation. Events are
//! immutable once written, so the store exposes no update path, only
//! inserts, reads, aggregation and retention cleanup.

pub mod error;
pub mod pool;
pub mod query;
pub mod schema;
pub mod store;
pub mod testing;

pub use error::{Result, StoreError};
pub use pool::create_pool;
pub use query::{AuditQuery, SecurityEventQuery, StatsQuery};
pub use schema::run_migrations;
pub use store::{
	AuditStats, AuditStore, EventTypeCount, SqliteAuditStore, SuspiciousIp, DEFAULT_FIND_LIMIT,
	DEFAULT_SECURITY_EVENT_LIMIT,
};
