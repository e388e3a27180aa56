// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Report collection over the audit store.

use std::sync::Arc;

use bramble_audit::{AuditEvent, AuditEventType};
use bramble_audit_store::{
	AuditQuery, AuditStats, AuditStore, SecurityEventQuery, StatsQuery, SuspiciousIp,
};
use bramble_config::MonitorConfig;
use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

use crate::error::MonitorError;

/// Collects the data behind one security report.
pub struct SecurityMonitor {
	store: Arc<dyn AuditStore>,
	config: MonitorConfig,
	ip_filter: Option<String>,
}

impl SecurityMonitor {
	/// A configured `ip_filter` applies from the start; [`with_ip_filter`]
	/// replaces it.
	///
	/// [`with_ip_filter`]: SecurityMonitor::with_ip_filter
	pub fn new(store: Arc<dyn AuditStore>, config: MonitorConfig) -> Self {
		let ip_filter = config.ip_filter.clone();
		Self {
			store,
			config,
			ip_filter,
		}
	}

	/// Restrict the failed-login section to one source address.
	pub fn with_ip_filter(mut self, ip: impl Into<String>) -> Self {
		self.ip_filter = Some(ip.into());
		self
	}

	pub fn config(&self) -> &MonitorConfig {
		&self.config
	}

	/// Gather all four report sections.
	///
	/// Sections are fetched in order; the first store failure aborts
	/// the whole collection.
	#[instrument(skip(self))]
	pub async fn collect(&self) -> Result<SecurityReport, MonitorError> {
		let failed_logins = self
			.store
			.find(AuditQuery {
				event_type: Some(AuditEventType::LoginFailed),
				ip_address: self.ip_filter.clone(),
				limit: Some(self.config.failed_login_limit),
				..Default::default()
			})
			.await?;

		let suspicious_ips = self
			.store
			.suspicious_ips(
				self.config.suspicious_threshold,
				self.config.suspicious_sample,
			)
			.await?;

		let recent_events = self
			.store
			.recent_security_events(SecurityEventQuery {
				limit: Some(self.config.security_event_limit),
				..Default::default()
			})
			.await?;

		let stats_start = Utc::now() - Duration::days(i64::from(self.config.stats_window_days));
		let stats = self
			.store
			.stats(StatsQuery {
				start: Some(stats_start),
				..Default::default()
			})
			.await?;

		Ok(SecurityReport {
			generated_at: Utc::now(),
			ip_filter: self.ip_filter.clone(),
			stats_window_days: self.config.stats_window_days,
			failed_logins,
			suspicious_ips,
			recent_events,
			stats,
		})
	}
}

/// Snapshot of the four report sections at one point in time.
///
/// Rendering lives in [`fmt::Display`](std::fmt::Display); the struct
/// itself stays printable-agnostic so callers can inspect sections
/// directly.
#[derive(Debug, Clone)]
pub struct SecurityReport {
	pub generated_at: DateTime<Utc>,
	/// Address the failed-login section was restricted to, if any.
	pub ip_filter: Option<String>,
	/// Days of history behind the statistics section.
	pub stats_window_days: u32,
	pub failed_logins: Vec<AuditEvent>,
	pub suspicious_ips: Vec<SuspiciousIp>,
	pub recent_events: Vec<AuditEvent>,
	pub stats: AuditStats,
}
