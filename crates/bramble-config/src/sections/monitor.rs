// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Security monitor configuration section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfigLayer {
	pub interval_secs: Option<u64>,
	pub failed_login_limit: Option<u32>,
	pub security_event_limit: Option<u32>,
	pub stats_window_days: Option<u32>,
	pub suspicious_threshold: Option<u32>,
	pub suspicious_sample: Option<u32>,
	pub ip_filter: Option<String>,
}

impl MonitorConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.interval_secs.is_some() {
			self.interval_secs = other.interval_secs;
		}
		if other.failed_login_limit.is_some() {
			self.failed_login_limit = other.failed_login_limit;
		}
		if other.security_event_limit.is_some() {
			self.security_event_limit = other.security_event_limit;
		}
		if other.stats_window_days.is_some() {
			self.stats_window_days = other.stats_window_days;
		}
		if other.suspicious_threshold.is_some() {
			self.suspicious_threshold = other.suspicious_threshold;
		}
		if other.suspicious_sample.is_some() {
			self.suspicious_sample = other.suspicious_sample;
		}
		if other.ip_filter.is_some() {
			self.ip_filter = other.ip_filter;
		}
	}

	pub fn finalize(self) -> MonitorConfig {
		MonitorConfig {
			interval_secs: self.interval_secs.unwrap_or(60),
			failed_login_limit: self.failed_login_limit.unwrap_or(20),
			security_event_limit: self.security_event_limit.unwrap_or(15),
			stats_window_days: self.stats_window_days.unwrap_or(30),
			suspicious_threshold: self.suspicious_threshold.unwrap_or(5),
			suspicious_sample: self.suspicious_sample.unwrap_or(1000),
			ip_filter: self.ip_filter,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
	/// Seconds between report cycles in watch mode.
	pub interval_secs: u64,
	/// Max failed-login rows listed per report.
	pub failed_login_limit: u32,
	/// Max security events listed per report.
	pub security_event_limit: u32,
	/// Days of history aggregated into the statistics section.
	pub stats_window_days: u32,
	/// Failed attempts from one address before it is flagged.
	pub suspicious_threshold: u32,
	/// How many of the newest failures the suspicious-IP scan samples.
	pub suspicious_sample: u32,
	/// Restrict the failed-login section to one source address.
	/// The `--ip` flag overrides this.
	pub ip_filter: Option<String>,
}

impl Default for MonitorConfig {
	fn default() -> Self {
		Self {
			interval_secs: 60,
			failed_login_limit: 20,
			security_event_limit: 15,
			stats_window_days: 30,
			suspicious_threshold: 5,
			suspicious_sample: 1000,
			ip_filter: None,
		}
	}
}
