// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use bramble_audit::{AuditEvent, AuditEventType, NewAuditEvent};

use crate::error::{Result, StoreError};
use crate::query::{AuditQuery, SecurityEventQuery, StatsQuery};

/// Page size used by [`AuditStore::find`] when the query sets none.
pub const DEFAULT_FIND_LIMIT: u32 = 100;

/// Page size used by [`AuditStore::recent_security_events`] when the
/// query sets none.
pub const DEFAULT_SECURITY_EVENT_LIMIT: u32 = 50;

/// Lookback applied by [`AuditStore::failed_login_attempts`] when the
/// caller passes no cutoff.
const DEFAULT_FAILED_LOGIN_WINDOW_HOURS: i64 = 24;

/// Recorded for origin fields the caller left unset.
const UNKNOWN_VALUE: &str = "unknown";

const EVENT_COLUMNS: &str =
	"id, timestamp, event_type, user_id, ip_address, user_agent, metadata, resource, action, success";

/// Aggregate statistics over a slice of the audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditStats {
	/// Number of events matching the query.
	pub total: u64,
	/// Event counts per type, most frequent first.
	pub by_event_type: Vec<EventTypeCount>,
	/// Percentage of matching events recorded as successful, in the
	/// range 0.0 to 100.0. Zero when nothing matched.
	pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeCount {
	pub event_type: AuditEventType,
	pub count: u64,
}

/// A source address with enough recent failed logins to warrant a look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousIp {
	pub ip_address: String,
	/// Failed login attempts within the sampled window.
	pub attempts: u64,
	/// Distinct account emails targeted from this address, where the
	/// events recorded one.
	pub emails: Vec<String>,
	pub last_attempt: DateTime<Utc>,
}

/// Persistence interface for audit events.
///
/// Implementations never retry on their own; a database failure
/// surfaces as [`StoreError::Unavailable`] and the caller decides.
#[async_trait]
pub trait AuditStore: Send + Sync {
	/// Persist a new event, assigning its ID and timestamp and filling
	/// unset fields with defaults.
	async fn create(&self, event: NewAuditEvent) -> Result<AuditEvent>;

	/// Fetch events matching the query, newest first.
	async fn find(&self, query: AuditQuery) -> Result<Vec<AuditEvent>>;

	/// Aggregate statistics over events matching the query.
	async fn stats(&self, query: StatsQuery) -> Result<AuditStats>;

	/// Recent events whose type is security-relevant, newest first.
	async fn recent_security_events(&self, query: SecurityEventQuery) -> Result<Vec<AuditEvent>>;

	/// Count failed logins from `ip_address` at or after `since`,
	/// defaulting to the last 24 hours.
	async fn failed_login_attempts(
		&self,
		ip_address: &str,
		since: Option<DateTime<Utc>>,
	) -> Result<u64>;

	/// Group the newest `sample` failed logins by source address and
	/// report every address with at least `threshold` attempts, most
	/// attempts first.
	async fn suspicious_ips(&self, threshold: u32, sample: u32) -> Result<Vec<SuspiciousIp>>;

	/// Delete events older than `retention_days` days, returning how
	/// many rows were removed. Safe to run repeatedly.
	async fn cleanup_old_logs(&self, retention_days: i64) -> Result<u64>;
}

/// SQLite-backed [`AuditStore`].
#[derive(Clone)]
pub struct SqliteAuditStore {
	pool: SqlitePool,
}

impl SqliteAuditStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	async fn count_events(&self, query: &StatsQuery) -> Result<u64> {
		let sql = format!(
			"SELECT COUNT(*) FROM audit_logs WHERE {}",
			stats_conditions(query)
		);

		let mut count_query = sqlx::query_as::<_, (i64,)>(&sql);
		if let Some(user_id) = query.user_id {
			count_query = count_query.bind(user_id.to_string());
		}
		if let Some(start) = query.start {
			count_query = count_query.bind(start.to_rfc3339());
		}
		if let Some(end) = query.end {
			count_query = count_query.bind(end.to_rfc3339());
		}

		let row = count_query.fetch_one(&self.pool).await?;
		Ok(row.0 as u64)
	}

	async fn count_by_event_type(&self, query: &StatsQuery) -> Result<Vec<EventTypeCount>> {
		let sql = format!(
			"SELECT event_type, COUNT(*) AS count FROM audit_logs WHERE {} \
			 GROUP BY event_type ORDER BY count DESC, event_type ASC",
			stats_conditions(query)
		);

		let mut group_query = sqlx::query_as::<_, (String, i64)>(&sql);
		if let Some(user_id) = query.user_id {
			group_query = group_query.bind(user_id.to_string());
		}
		if let Some(start) = query.start {
			group_query = group_query.bind(start.to_rfc3339());
		}
		if let Some(end) = query.end {
			group_query = group_query.bind(end.to_rfc3339());
		}

		let rows = group_query.fetch_all(&self.pool).await?;
		rows.into_iter()
			.map(|(event_type, count)| {
				Ok(EventTypeCount {
					event_type: event_type
						.parse::<AuditEventType>()
						.map_err(|e| StoreError::Corrupt(e.to_string()))?,
					count: count as u64,
				})
			})
			.collect()
	}

	async fn count_successes(&self, query: &StatsQuery) -> Result<u64> {
		let sql = format!(
			"SELECT COUNT(*) FROM audit_logs WHERE success = 1 AND {}",
			stats_conditions(query)
		);

		let mut count_query = sqlx::query_as::<_, (i64,)>(&sql);
		if let Some(user_id) = query.user_id {
			count_query = count_query.bind(user_id.to_string());
		}
		if let Some(start) = query.start {
			count_query = count_query.bind(start.to_rfc3339());
		}
		if let Some(end) = query.end {
			count_query = count_query.bind(end.to_rfc3339());
		}

		let row = count_query.fetch_one(&self.pool).await?;
		Ok(row.0 as u64)
	}
}

#[async_trait]
impl AuditStore for SqliteAuditStore {
	#[instrument(skip(self, event), fields(event_type = %event.event_type))]
	async fn create(&self, event: NewAuditEvent) -> Result<AuditEvent> {
		let stored = AuditEvent {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			event_type: event.event_type,
			user_id: event.user_id,
			ip_address: event.ip_address.unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
			user_agent: event.user_agent.unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
			metadata: event.metadata.unwrap_or_default(),
			resource: event.resource,
			action: event.action,
			success: event.success.unwrap_or(true),
		};

		let metadata_json = serde_json::to_string(&stored.metadata)?;

		sqlx::query(
			r#"
			INSERT INTO audit_logs (id, timestamp, event_type, user_id, ip_address, user_agent, metadata, resource, action, success)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(stored.id.to_string())
		.bind(stored.timestamp.to_rfc3339())
		.bind(stored.event_type.to_string())
		.bind(stored.user_id.map(|id| id.to_string()))
		.bind(&stored.ip_address)
		.bind(&stored.user_agent)
		.bind(&metadata_json)
		.bind(&stored.resource)
		.bind(&stored.action)
		.bind(stored.success)
		.execute(&self.pool)
		.await?;

		tracing::debug!(event_id = %stored.id, "audit event recorded");
		Ok(stored)
	}

	#[instrument(skip(self))]
	async fn find(&self, query: AuditQuery) -> Result<Vec<AuditEvent>> {
		query.validate()?;

		let limit = query.limit.unwrap_or(DEFAULT_FIND_LIMIT);
		let offset = query.offset.unwrap_or(0);

		let mut conditions = vec!["1=1".to_string()];
		if query.user_id.is_some() {
			conditions.push("user_id = ?".to_string());
		}
		if query.event_type.is_some() {
			conditions.push("event_type = ?".to_string());
		}
		if query.ip_address.is_some() {
			conditions.push("ip_address = ?".to_string());
		}
		if query.start.is_some() {
			conditions.push("timestamp >= ?".to_string());
		}
		if query.end.is_some() {
			conditions.push("timestamp <= ?".to_string());
		}

		let sql = format!(
			"SELECT {EVENT_COLUMNS} FROM audit_logs WHERE {} \
			 ORDER BY timestamp DESC LIMIT ? OFFSET ?",
			conditions.join(" AND ")
		);

		let mut data_query = sqlx::query_as::<_, AuditRow>(&sql);
		if let Some(user_id) = query.user_id {
			data_query = data_query.bind(user_id.to_string());
		}
		if let Some(event_type) = query.event_type {
			data_query = data_query.bind(event_type.to_string());
		}
		if let Some(ip) = &query.ip_address {
			data_query = data_query.bind(ip.clone());
		}
		if let Some(start) = query.start {
			data_query = data_query.bind(start.to_rfc3339());
		}
		if let Some(end) = query.end {
			data_query = data_query.bind(end.to_rfc3339());
		}
		data_query = data_query.bind(i64::from(limit)).bind(i64::from(offset));

		let rows = data_query.fetch_all(&self.pool).await?;
		rows.into_iter().map(TryInto::try_into).collect()
	}

	#[instrument(skip(self))]
	async fn stats(&self, query: StatsQuery) -> Result<AuditStats> {
		query.validate()?;

		let (total, by_event_type, successes) = tokio::try_join!(
			self.count_events(&query),
			self.count_by_event_type(&query),
			self.count_successes(&query),
		)?;

		let success_rate = if total == 0 {
			0.0
		} else {
			successes as f64 / total as f64 * 100.0
		};

		Ok(AuditStats {
			total,
			by_event_type,
			success_rate,
		})
	}

	#[instrument(skip(self))]
	async fn recent_security_events(&self, query: SecurityEventQuery) -> Result<Vec<AuditEvent>> {
		query.validate()?;

		let limit = query.limit.unwrap_or(DEFAULT_SECURITY_EVENT_LIMIT);
		let security_types = AuditEventType::security_types();

		let placeholders = vec!["?"; security_types.len()].join(", ");
		let mut conditions = vec![format!("event_type IN ({placeholders})")];
		if query.start.is_some() {
			conditions.push("timestamp >= ?".to_string());
		}
		if query.end.is_some() {
			conditions.push("timestamp <= ?".to_string());
		}

		let sql = format!(
			"SELECT {EVENT_COLUMNS} FROM audit_logs WHERE {} \
			 ORDER BY timestamp DESC LIMIT ?",
			conditions.join(" AND ")
		);

		let mut data_query = sqlx::query_as::<_, AuditRow>(&sql);
		for event_type in security_types {
			data_query = data_query.bind(event_type.to_string());
		}
		if let Some(start) = query.start {
			data_query = data_query.bind(start.to_rfc3339());
		}
		if let Some(end) = query.end {
			data_query = data_query.bind(end.to_rfc3339());
		}
		data_query = data_query.bind(i64::from(limit));

		let rows = data_query.fetch_all(&self.pool).await?;
		rows.into_iter().map(TryInto::try_into).collect()
	}

	#[instrument(skip(self))]
	async fn failed_login_attempts(
		&self,
		ip_address: &str,
		since: Option<DateTime<Utc>>,
	) -> Result<u64> {
		let since = since
			.unwrap_or_else(|| Utc::now() - Duration::hours(DEFAULT_FAILED_LOGIN_WINDOW_HOURS));

		let row: (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM audit_logs \
			 WHERE event_type = ? AND ip_address = ? AND timestamp >= ?",
		)
		.bind(AuditEventType::LoginFailed.to_string())
		.bind(ip_address)
		.bind(since.to_rfc3339())
		.fetch_one(&self.pool)
		.await?;

		Ok(row.0 as u64)
	}

	#[instrument(skip(self))]
	async fn suspicious_ips(&self, threshold: u32, sample: u32) -> Result<Vec<SuspiciousIp>> {
		let rows: Vec<(String, i64, Option<String>, String)> = sqlx::query_as(
			r#"
			SELECT ip_address,
				COUNT(*) AS attempts,
				GROUP_CONCAT(DISTINCT json_extract(metadata, '$.email')) AS emails,
				MAX(timestamp) AS last_attempt
			FROM (
				SELECT ip_address, metadata, timestamp
				FROM audit_logs
				WHERE event_type = ?
				ORDER BY timestamp DESC
				LIMIT ?
			)
			GROUP BY ip_address
			HAVING COUNT(*) >= ?
			ORDER BY attempts DESC, ip_address ASC
			"#,
		)
		.bind(AuditEventType::LoginFailed.to_string())
		.bind(i64::from(sample))
		.bind(i64::from(threshold))
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter()
			.map(|(ip_address, attempts, emails, last_attempt)| {
				Ok(SuspiciousIp {
					ip_address,
					attempts: attempts as u64,
					emails: emails
						.map(|joined| joined.split(',').map(str::to_string).collect())
						.unwrap_or_default(),
					last_attempt: parse_timestamp(&last_attempt)?,
				})
			})
			.collect()
	}

	#[instrument(skip(self))]
	async fn cleanup_old_logs(&self, retention_days: i64) -> Result<u64> {
		if retention_days < 0 {
			return Err(StoreError::InvalidQuery(
				"retention days must be non-negative".to_string(),
			));
		}

		let cutoff = Utc::now() - Duration::days(retention_days);
		let result = sqlx::query("DELETE FROM audit_logs WHERE timestamp < ?")
			.bind(cutoff.to_rfc3339())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected();
		tracing::debug!(deleted, "audit log cleanup complete");
		Ok(deleted)
	}
}

fn stats_conditions(query: &StatsQuery) -> String {
	let mut conditions = vec!["1=1".to_string()];
	if query.user_id.is_some() {
		conditions.push("user_id = ?".to_string());
	}
	if query.start.is_some() {
		conditions.push("timestamp >= ?".to_string());
	}
	if query.end.is_some() {
		conditions.push("timestamp <= ?".to_string());
	}
	conditions.join(" AND ")
}

#[derive(sqlx::FromRow)]
struct AuditRow {
	id: String,
	timestamp: String,
	event_type: String,
	user_id: Option<String>,
	ip_address: String,
	user_agent: String,
	metadata: String,
	resource: Option<String>,
	action: Option<String>,
	success: bool,
}

impl TryFrom<AuditRow> for AuditEvent {
	type Error = StoreError;

	fn try_from(row: AuditRow) -> Result<Self> {
		let user_id = row
			.user_id
			.map(|raw| raw.parse())
			.transpose()
			.map_err(|e| StoreError::Corrupt(format!("{e}")))?;

		Ok(AuditEvent {
			id: Uuid::parse_str(&row.id)
				.map_err(|e| StoreError::Corrupt(format!("invalid event ID: {e}")))?,
			timestamp: parse_timestamp(&row.timestamp)?,
			event_type: row
				.event_type
				.parse()
				.map_err(|e| StoreError::Corrupt(format!("{e}")))?,
			user_id,
			ip_address: row.ip_address,
			user_agent: row.user_agent,
			metadata: serde_json::from_str(&row.metadata)
				.map_err(|e| StoreError::Corrupt(format!("invalid metadata: {e}")))?,
			resource: row.resource,
			action: row.action,
			success: row.success,
		})
	}
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| StoreError::Corrupt(format!("invalid timestamp: {e}")))
}
