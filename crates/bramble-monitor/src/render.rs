// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Human-readable rendering of a security report.
//!
//! Styling degrades to plain text automatically when stdout is not a
//! terminal.

use std::fmt;

use bramble_audit::{AuditEvent, AuditEventType};
use console::{style, StyledObject};

use crate::monitor::SecurityReport;

const USER_AGENT_DISPLAY_LEN: usize = 60;
const TOP_EVENT_TYPES: usize = 10;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl fmt::Display for SecurityReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", style("Bramble Security Report").bold())?;
		writeln!(
			f,
			"Generated: {}",
			self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
		)?;

		writeln!(f)?;
		match &self.ip_filter {
			Some(ip) => writeln!(
				f,
				"{} (from {})",
				style("Failed logins").bold(),
				style(ip).cyan()
			)?,
			None => writeln!(f, "{}", style("Failed logins").bold())?,
		}
		if self.failed_logins.is_empty() {
			writeln!(f, "  {}", style("(none)").dim())?;
		}
		for event in &self.failed_logins {
			writeln!(
				f,
				"  {} {}  {}  {}  {}",
				style("✗").red(),
				event.timestamp.format(TIMESTAMP_FORMAT),
				attempted_email(event),
				style(&event.ip_address).cyan(),
				style(truncate_user_agent(&event.user_agent)).dim()
			)?;
		}

		writeln!(f)?;
		writeln!(f, "{}", style("Suspicious IPs").bold())?;
		if self.suspicious_ips.is_empty() {
			writeln!(f, "  {}", style("(none)").dim())?;
		}
		for entry in &self.suspicious_ips {
			let targets = if entry.emails.is_empty() {
				"unknown".to_string()
			} else {
				entry.emails.join(", ")
			};
			writeln!(
				f,
				"  {} {}  {} attempts  last {}  targets: {}",
				style("⚠").yellow().bold(),
				style(&entry.ip_address).cyan(),
				style(entry.attempts).red().bold(),
				entry.last_attempt.format(TIMESTAMP_FORMAT),
				targets
			)?;
		}

		writeln!(f)?;
		writeln!(f, "{}", style("Recent security events").bold())?;
		if self.recent_events.is_empty() {
			writeln!(f, "  {}", style("(none)").dim())?;
		}
		for event in &self.recent_events {
			writeln!(
				f,
				"  {} {}  {:<26}{}",
				event_icon(event.event_type),
				event.timestamp.format(TIMESTAMP_FORMAT),
				event.event_type.to_string(),
				style(&event.ip_address).cyan()
			)?;
		}

		writeln!(f)?;
		writeln!(
			f,
			"{} (last {} days)",
			style("Statistics").bold(),
			self.stats_window_days
		)?;
		writeln!(f, "  Total events: {}", self.stats.total)?;
		writeln!(f, "  Success rate: {:.1}%", self.stats.success_rate)?;
		if !self.stats.by_event_type.is_empty() {
			writeln!(f, "  Top event types:")?;
			for entry in self.stats.by_event_type.iter().take(TOP_EVENT_TYPES) {
				writeln!(f, "    {:<26}{}", entry.event_type.to_string(), entry.count)?;
			}
		}

		Ok(())
	}
}

/// Presentation glyph for an event type. Types outside the mapped set
/// share a neutral bullet.
fn event_icon(event_type: AuditEventType) -> StyledObject<&'static str> {
	match event_type {
		AuditEventType::LoginSuccess => style("✓").green(),
		AuditEventType::LoginFailed => style("✗").red(),
		AuditEventType::Logout => style("→").dim(),
		AuditEventType::AccountLocked => style("🔒").red(),
		AuditEventType::SuspiciousActivity | AuditEventType::CsrfInvalid => {
			style("⚠").yellow()
		}
		AuditEventType::TwoFactorEnabled => style("🔐").green(),
		AuditEventType::TwoFactorDisabled => style("🔓").yellow(),
		AuditEventType::PasswordChanged
		| AuditEventType::PasswordResetRequested
		| AuditEventType::PasswordResetCompleted => style("🔑").cyan(),
		_ => style("•").dim(),
	}
}

/// Email the failed attempt targeted, where the event recorded one.
fn attempted_email(event: &AuditEvent) -> &str {
	event
		.metadata
		.get("email")
		.and_then(|value| value.as_str())
		.unwrap_or("unknown")
}

fn truncate_user_agent(user_agent: &str) -> String {
	if user_agent.chars().count() <= USER_AGENT_DISPLAY_LEN {
		return user_agent.to_string();
	}
	let mut truncated: String = user_agent.chars().take(USER_AGENT_DISPLAY_LEN).collect();
	truncated.push('…');
	truncated
}

#[cfg(test)]
mod tests {
	use super::*;
	use bramble_audit::Metadata;
	use bramble_audit_store::{AuditStats, EventTypeCount, SuspiciousIp};
	use chrono::Utc;
	use uuid::Uuid;

	fn sample_event(event_type: AuditEventType, ip: &str) -> AuditEvent {
		AuditEvent {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			event_type,
			user_id: None,
			ip_address: ip.to_string(),
			user_agent: "integration-test-agent".to_string(),
			metadata: Metadata::new(),
			resource: None,
			action: None,
			success: true,
		}
	}

	fn empty_report() -> SecurityReport {
		SecurityReport {
			generated_at: Utc::now(),
			ip_filter: None,
			stats_window_days: 30,
			failed_logins: Vec::new(),
			suspicious_ips: Vec::new(),
			recent_events: Vec::new(),
			stats: AuditStats {
				total: 0,
				by_event_type: Vec::new(),
				success_rate: 0.0,
			},
		}
	}

	#[test]
	fn renders_all_sections_with_data() {
		let mut failed = sample_event(AuditEventType::LoginFailed, "203.0.113.9");
		failed.metadata.insert(
			"email".to_string(),
			serde_json::json!("victim@example.com"),
		);

		let report = SecurityReport {
			failed_logins: vec![failed],
			suspicious_ips: vec![SuspiciousIp {
				ip_address: "203.0.113.9".to_string(),
				attempts: 6,
				emails: vec!["victim@example.com".to_string()],
				last_attempt: Utc::now(),
			}],
			recent_events: vec![
				sample_event(AuditEventType::LoginSuccess, "198.51.100.7"),
				sample_event(AuditEventType::CsrfInvalid, "198.51.100.8"),
			],
			stats: AuditStats {
				total: 42,
				by_event_type: vec![
					EventTypeCount {
						event_type: AuditEventType::LoginSuccess,
						count: 30,
					},
					EventTypeCount {
						event_type: AuditEventType::LoginFailed,
						count: 12,
					},
				],
				success_rate: 92.3,
			},
			..empty_report()
		};

		let rendered = report.to_string();

		assert!(rendered.contains("Bramble Security Report"));
		assert!(rendered.contains("Failed logins"));
		assert!(rendered.contains("victim@example.com"));
		assert!(rendered.contains("Suspicious IPs"));
		assert!(rendered.contains("6 attempts"));
		assert!(rendered.contains("Recent security events"));
		assert!(rendered.contains("login_success"));
		assert!(rendered.contains("csrf_invalid"));
		assert!(rendered.contains("Statistics (last 30 days)"));
		assert!(rendered.contains("Total events: 42"));
		assert!(rendered.contains("Success rate: 92.3%"));
	}

	#[test]
	fn marks_empty_sections() {
		let rendered = empty_report().to_string();
		assert_eq!(rendered.matches("(none)").count(), 3);
		assert!(rendered.contains("Success rate: 0.0%"));
	}

	#[test]
	fn shows_ip_filter_in_header() {
		let report = SecurityReport {
			ip_filter: Some("203.0.113.9".to_string()),
			..empty_report()
		};
		assert!(report.to_string().contains("(from 203.0.113.9)"));
	}

	#[test]
	fn falls_back_to_unknown_email() {
		let event = sample_event(AuditEventType::LoginFailed, "203.0.113.9");
		assert_eq!(attempted_email(&event), "unknown");
	}

	#[test]
	fn reads_email_from_metadata() {
		let mut event = sample_event(AuditEventType::LoginFailed, "203.0.113.9");
		event
			.metadata
			.insert("email".to_string(), serde_json::json!("a@b.example"));
		assert_eq!(attempted_email(&event), "a@b.example");
	}

	#[test]
	fn truncates_long_user_agents() {
		let long = "x".repeat(200);
		let truncated = truncate_user_agent(&long);
		assert_eq!(truncated.chars().count(), USER_AGENT_DISPLAY_LEN + 1);
		assert!(truncated.ends_with('…'));

		let short = "curl/8.0";
		assert_eq!(truncate_user_agent(short), short);
	}

	#[test]
	fn unmapped_types_use_fallback_icon() {
		let icon = format!("{}", event_icon(AuditEventType::ProductCreated));
		assert!(icon.contains('•'));

		let mapped = format!("{}", event_icon(AuditEventType::AccountLocked));
		assert!(mapped.contains('🔒'));
	}
}
