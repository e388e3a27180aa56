// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bramble_audit::{AuditEventType, UserId};
use chrono::{DateTime, Utc};

use crate::error::{Result, StoreError};

/// Filters for [`AuditStore::find`](crate::store::AuditStore::find).
///
/// Absent fields do not constrain the result. All bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
	/// Exact match on the acting user.
	pub user_id: Option<UserId>,
	/// Exact match on the event type.
	pub event_type: Option<AuditEventType>,
	/// Exact match on the source address.
	pub ip_address: Option<String>,
	/// Earliest timestamp to include.
	pub start: Option<DateTime<Utc>>,
	/// Latest timestamp to include.
	pub end: Option<DateTime<Utc>>,
	/// Page size, defaults to [`DEFAULT_FIND_LIMIT`](crate::store::DEFAULT_FIND_LIMIT).
	pub limit: Option<u32>,
	/// Rows to skip, defaults to zero.
	pub offset: Option<u32>,
}

impl AuditQuery {
	pub fn validate(&self) -> Result<()> {
		validate_range(self.start, self.end)?;
		validate_limit(self.limit)
	}
}

/// Filters for [`AuditStore::stats`](crate::store::AuditStore::stats).
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
	pub user_id: Option<UserId>,
	pub start: Option<DateTime<Utc>>,
	pub end: Option<DateTime<Utc>>,
}

impl StatsQuery {
	pub fn validate(&self) -> Result<()> {
		validate_range(self.start, self.end)
	}
}

/// Filters for [`AuditStore::recent_security_events`](crate::store::AuditStore::recent_security_events).
#[derive(Debug, Clone, Default)]
pub struct SecurityEventQuery {
	/// Page size, defaults to
	/// [`DEFAULT_SECURITY_EVENT_LIMIT`](crate::store::DEFAULT_SECURITY_EVENT_LIMIT).
	pub limit: Option<u32>,
	pub start: Option<DateTime<Utc>>,
	pub end: Option<DateTime<Utc>>,
}

impl SecurityEventQuery {
	pub fn validate(&self) -> Result<()> {
		validate_range(self.start, self.end)?;
		validate_limit(self.limit)
	}
}

fn validate_range(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<()> {
	if let (Some(start), Some(end)) = (start, end) {
		if start > end {
			return Err(StoreError::InvalidQuery(
				"start must not be after end".to_string(),
			));
		}
	}
	Ok(())
}

fn validate_limit(limit: Option<u32>) -> Result<()> {
	if limit == Some(0) {
		return Err(StoreError::InvalidQuery("limit must be positive".to_string()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Duration;

	#[test]
	fn empty_query_is_valid() {
		assert!(AuditQuery::default().validate().is_ok());
		assert!(StatsQuery::default().validate().is_ok());
		assert!(SecurityEventQuery::default().validate().is_ok());
	}

	#[test]
	fn inverted_range_is_rejected() {
		let now = Utc::now();
		let query = AuditQuery {
			start: Some(now),
			end: Some(now - Duration::hours(1)),
			..Default::default()
		};

		let err = query.validate().unwrap_err();
		assert!(matches!(err, StoreError::InvalidQuery(_)));
	}

	#[test]
	fn equal_bounds_are_valid() {
		let now = Utc::now();
		let query = AuditQuery {
			start: Some(now),
			end: Some(now),
			..Default::default()
		};

		assert!(query.validate().is_ok());
	}

	#[test]
	fn zero_limit_is_rejected() {
		let query = AuditQuery {
			limit: Some(0),
			..Default::default()
		};
		assert!(matches!(
			query.validate().unwrap_err(),
			StoreError::InvalidQuery(_)
		));

		let query = SecurityEventQuery {
			limit: Some(0),
			..Default::default()
		};
		assert!(matches!(
			query.validate().unwrap_err(),
			StoreError::InvalidQuery(_)
		));
	}

	#[test]
	fn stats_query_rejects_inverted_range() {
		let now = Utc::now();
		let query = StatsQuery {
			start: Some(now),
			end: Some(now - Duration::days(1)),
			..Default::default()
		};

		assert!(query.validate().is_err());
	}
}
