// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core event types for audit logging.
//!
//! This module provides the foundational types for the audit system:
//!
//! - [`AuditEventType`]: Enumeration of all auditable events
//! - [`AuditEvent`]: A persisted audit record
//! - [`NewAuditEvent`]: Input shape for recording a new event
//! - [`AuditEventBuilder`]: Fluent API for constructing inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AuditError;

/// Open, schema-less payload attached to an event.
///
/// Values may be strings, numbers, booleans or nested mappings; the store
/// round-trips the mapping without interpreting it.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Types of events that can be recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
	// Authentication events
	LoginSuccess,
	LoginFailed,
	Logout,

	// Session events
	SessionCreated,
	SessionExpired,

	// Security incidents
	AccountLocked,
	SuspiciousActivity,
	CsrfInvalid,

	// Credential changes
	TwoFactorEnabled,
	TwoFactorDisabled,
	PasswordChanged,
	PasswordResetRequested,
	PasswordResetCompleted,

	// Catalog events
	ProductCreated,
	ProductUpdated,
	ProductDeleted,

	// Order events
	OrderCreated,
	OrderUpdated,
	OrderDeleted,

	// Customer events
	CustomerCreated,
	CustomerUpdated,
	CustomerDeleted,

	// Contact events
	MessageCreated,
	MessageDeleted,

	// Newsletter events
	NewsletterSubscribed,
	NewsletterUnsubscribed,
}

impl fmt::Display for AuditEventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			// Authentication events
			AuditEventType::LoginSuccess => "login_success",
			AuditEventType::LoginFailed => "login_failed",
			AuditEventType::Logout => "logout",

			// Session events
			AuditEventType::SessionCreated => "session_created",
			AuditEventType::SessionExpired => "session_expired",

			// Security incidents
			AuditEventType::AccountLocked => "account_locked",
			AuditEventType::SuspiciousActivity => "suspicious_activity",
			AuditEventType::CsrfInvalid => "csrf_invalid",

			// Credential changes
			AuditEventType::TwoFactorEnabled => "two_factor_enabled",
			AuditEventType::TwoFactorDisabled => "two_factor_disabled",
			AuditEventType::PasswordChanged => "password_changed",
			AuditEventType::PasswordResetRequested => "password_reset_requested",
			AuditEventType::PasswordResetCompleted => "password_reset_completed",

			// Catalog events
			AuditEventType::ProductCreated => "product_created",
			AuditEventType::ProductUpdated => "product_updated",
			AuditEventType::ProductDeleted => "product_deleted",

			// Order events
			AuditEventType::OrderCreated => "order_created",
			AuditEventType::OrderUpdated => "order_updated",
			AuditEventType::OrderDeleted => "order_deleted",

			// Customer events
			AuditEventType::CustomerCreated => "customer_created",
			AuditEventType::CustomerUpdated => "customer_updated",
			AuditEventType::CustomerDeleted => "customer_deleted",

			// Contact events
			AuditEventType::MessageCreated => "message_created",
			AuditEventType::MessageDeleted => "message_deleted",

			// Newsletter events
			AuditEventType::NewsletterSubscribed => "newsletter_subscribed",
			AuditEventType::NewsletterUnsubscribed => "newsletter_unsubscribed",
		};
		write!(f, "{s}")
	}
}

impl FromStr for AuditEventType {
	type Err = AuditError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"login_success" => Ok(AuditEventType::LoginSuccess),
			"login_failed" => Ok(AuditEventType::LoginFailed),
			"logout" => Ok(AuditEventType::Logout),
			"session_created" => Ok(AuditEventType::SessionCreated),
			"session_expired" => Ok(AuditEventType::SessionExpired),
			"account_locked" => Ok(AuditEventType::AccountLocked),
			"suspicious_activity" => Ok(AuditEventType::SuspiciousActivity),
			"csrf_invalid" => Ok(AuditEventType::CsrfInvalid),
			"two_factor_enabled" => Ok(AuditEventType::TwoFactorEnabled),
			"two_factor_disabled" => Ok(AuditEventType::TwoFactorDisabled),
			"password_changed" => Ok(AuditEventType::PasswordChanged),
			"password_reset_requested" => Ok(AuditEventType::PasswordResetRequested),
			"password_reset_completed" => Ok(AuditEventType::PasswordResetCompleted),
			"product_created" => Ok(AuditEventType::ProductCreated),
			"product_updated" => Ok(AuditEventType::ProductUpdated),
			"product_deleted" => Ok(AuditEventType::ProductDeleted),
			"order_created" => Ok(AuditEventType::OrderCreated),
			"order_updated" => Ok(AuditEventType::OrderUpdated),
			"order_deleted" => Ok(AuditEventType::OrderDeleted),
			"customer_created" => Ok(AuditEventType::CustomerCreated),
			"customer_updated" => Ok(AuditEventType::CustomerUpdated),
			"customer_deleted" => Ok(AuditEventType::CustomerDeleted),
			"message_created" => Ok(AuditEventType::MessageCreated),
			"message_deleted" => Ok(AuditEventType::MessageDeleted),
			"newsletter_subscribed" => Ok(AuditEventType::NewsletterSubscribed),
			"newsletter_unsubscribed" => Ok(AuditEventType::NewsletterUnsubscribed),
			_ => Err(AuditError::UnknownEventType(s.to_string())),
		}
	}
}

/// Event types treated as security-relevant.
///
/// Session lifecycle and business mutations are deliberately excluded;
/// they are auditable but do not belong in security reporting.
const SECURITY_EVENT_TYPES: [AuditEventType; 11] = [
	AuditEventType::LoginSuccess,
	AuditEventType::LoginFailed,
	AuditEventType::Logout,
	AuditEventType::AccountLocked,
	AuditEventType::SuspiciousActivity,
	AuditEventType::CsrfInvalid,
	AuditEventType::TwoFactorEnabled,
	AuditEventType::TwoFactorDisabled,
	AuditEventType::PasswordChanged,
	AuditEventType::PasswordResetRequested,
	AuditEventType::PasswordResetCompleted,
];

impl AuditEventType {
	/// Returns the fixed allowlist of security-relevant event types.
	pub fn security_types() -> &'static [AuditEventType] {
		&SECURITY_EVENT_TYPES
	}

	/// Whether this event type belongs to the security allowlist.
	pub fn is_security_relevant(&self) -> bool {
		SECURITY_EVENT_TYPES.contains(self)
	}
}

/// A unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	pub fn into_inner(self) -> Uuid {
		self.0
	}

	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<Uuid> for UserId {
	fn from(id: Uuid) -> Self {
		Self(id)
	}
}

impl From<UserId> for Uuid {
	fn from(id: UserId) -> Self {
		id.0
	}
}

impl FromStr for UserId {
	type Err = AuditError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Uuid::parse_str(s)
			.map(Self)
			.map_err(|_| AuditError::InvalidUserId(s.to_string()))
	}
}

/// A persisted audit event.
///
/// `id` and `timestamp` are assigned by the store on insert and are never
/// supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
	/// Unique identifier for this event.
	pub id: Uuid,
	/// When the event was recorded.
	pub timestamp: DateTime<Utc>,
	/// The type of event.
	pub event_type: AuditEventType,
	/// The user who performed the action (if known).
	pub user_id: Option<UserId>,
	/// IP address of the request origin.
	pub ip_address: String,
	/// User agent string from the request.
	pub user_agent: String,
	/// Additional event-specific details.
	#[serde(default)]
	pub metadata: Metadata,
	/// The resource affected (e.g. "product", "order").
	pub resource: Option<String>,
	/// Short description of the action taken.
	pub action: Option<String>,
	/// Whether the recorded action succeeded.
	pub success: bool,
}

/// Input for recording a new audit event.
///
/// Omitted fields are filled with store defaults on insert: `"unknown"`
/// for `ip_address` and `user_agent`, an empty mapping for `metadata`,
/// and `true` for `success`.
#[derive(Debug, Clone)]
pub struct NewAuditEvent {
	pub event_type: AuditEventType,
	pub user_id: Option<UserId>,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub metadata: Option<Metadata>,
	pub resource: Option<String>,
	pub action: Option<String>,
	pub success: Option<bool>,
}

impl NewAuditEvent {
	/// Create an input with only the event type set.
	pub fn new(event_type: AuditEventType) -> Self {
		Self {
			event_type,
			user_id: None,
			ip_address: None,
			user_agent: None,
			metadata: None,
			resource: None,
			action: None,
			success: None,
		}
	}

	/// Create a builder for the given event type.
	pub fn builder(event_type: AuditEventType) -> AuditEventBuilder {
		AuditEventBuilder::new(event_type)
	}
}

/// Builder for constructing audit event inputs with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditEventBuilder {
	event: NewAuditEvent,
}

impl AuditEventBuilder {
	/// Create a new builder for the given event type.
	pub fn new(event_type: AuditEventType) -> Self {
		Self {
			event: NewAuditEvent::new(event_type),
		}
	}

	/// Set the user who performed the action.
	pub fn user(mut self, user_id: UserId) -> Self {
		self.event.user_id = Some(user_id);
		self
	}

	/// Set the IP address of the request origin.
	pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
		self.event.ip_address = Some(ip.into());
		self
	}

	/// Set the user agent string from the request.
	pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
		self.event.user_agent = Some(ua.into());
		self
	}

	/// Replace the event metadata wholesale.
	pub fn metadata(mut self, metadata: Metadata) -> Self {
		self.event.metadata = Some(metadata);
		self
	}

	/// Add a single metadata entry, keeping existing entries.
	pub fn metadata_entry(
		mut self,
		key: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self
			.event
			.metadata
			.get_or_insert_with(Metadata::new)
			.insert(key.into(), value.into());
		self
	}

	/// Set the resource affected by this event.
	pub fn resource(mut self, resource: impl Into<String>) -> Self {
		self.event.resource = Some(resource.into());
		self
	}

	/// Set the action description.
	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.event.action = Some(action.into());
		self
	}

	/// Mark whether the recorded action succeeded.
	pub fn success(mut self, success: bool) -> Self {
		self.event.success = Some(success);
		self
	}

	/// Build the event input.
	pub fn build(self) -> NewAuditEvent {
		self.event
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const ALL_EVENT_TYPES: [AuditEventType; 26] = [
		AuditEventType::LoginSuccess,
		AuditEventType::LoginFailed,
		AuditEventType::Logout,
		AuditEventType::SessionCreated,
		AuditEventType::SessionExpired,
		AuditEventType::AccountLocked,
		AuditEventType::SuspiciousActivity,
		AuditEventType::CsrfInvalid,
		AuditEventType::TwoFactorEnabled,
		AuditEventType::TwoFactorDisabled,
		AuditEventType::PasswordChanged,
		AuditEventType::PasswordResetRequested,
		AuditEventType::PasswordResetCompleted,
		AuditEventType::ProductCreated,
		AuditEventType::ProductUpdated,
		AuditEventType::ProductDeleted,
		AuditEventType::OrderCreated,
		AuditEventType::OrderUpdated,
		AuditEventType::OrderDeleted,
		AuditEventType::CustomerCreated,
		AuditEventType::CustomerUpdated,
		AuditEventType::CustomerDeleted,
		AuditEventType::MessageCreated,
		AuditEventType::MessageDeleted,
		AuditEventType::NewsletterSubscribed,
		AuditEventType::NewsletterUnsubscribed,
	];

	mod audit_event_type {
		use super::*;

		#[test]
		fn display_returns_snake_case() {
			assert_eq!(AuditEventType::LoginSuccess.to_string(), "login_success");
			assert_eq!(AuditEventType::LoginFailed.to_string(), "login_failed");
			assert_eq!(
				AuditEventType::SessionCreated.to_string(),
				"session_created"
			);
			assert_eq!(AuditEventType::CsrfInvalid.to_string(), "csrf_invalid");
			assert_eq!(
				AuditEventType::PasswordResetRequested.to_string(),
				"password_reset_requested"
			);
			assert_eq!(
				AuditEventType::ProductCreated.to_string(),
				"product_created"
			);
			assert_eq!(
				AuditEventType::NewsletterUnsubscribed.to_string(),
				"newsletter_unsubscribed"
			);
		}

		#[test]
		fn serializes_snake_case() {
			let event = AuditEventType::AccountLocked;
			let json = serde_json::to_string(&event).unwrap();
			assert_eq!(json, "\"account_locked\"");
		}

		#[test]
		fn deserializes_snake_case() {
			let event: AuditEventType = serde_json::from_str("\"two_factor_enabled\"").unwrap();
			assert_eq!(event, AuditEventType::TwoFactorEnabled);
		}

		#[test]
		fn all_event_types_parse_from_display() {
			for event in ALL_EVENT_TYPES {
				let parsed: AuditEventType = event.to_string().parse().unwrap();
				assert_eq!(event, parsed);
			}
		}

		#[test]
		fn all_event_types_serialize_deserialize() {
			for event in ALL_EVENT_TYPES {
				let json = serde_json::to_string(&event).unwrap();
				let roundtrip: AuditEventType = serde_json::from_str(&json).unwrap();
				assert_eq!(event, roundtrip);
			}
		}

		#[test]
		fn display_matches_serde_name() {
			for event in ALL_EVENT_TYPES {
				let json = serde_json::to_string(&event).unwrap();
				assert_eq!(json, format!("\"{event}\""));
			}
		}

		#[test]
		fn unknown_event_type_is_rejected() {
			let err = "coffee_brewed".parse::<AuditEventType>().unwrap_err();
			assert!(matches!(err, AuditError::UnknownEventType(s) if s == "coffee_brewed"));
		}

		#[test]
		fn security_allowlist_membership() {
			assert!(AuditEventType::LoginSuccess.is_security_relevant());
			assert!(AuditEventType::LoginFailed.is_security_relevant());
			assert!(AuditEventType::Logout.is_security_relevant());
			assert!(AuditEventType::AccountLocked.is_security_relevant());
			assert!(AuditEventType::PasswordResetCompleted.is_security_relevant());

			assert!(!AuditEventType::SessionCreated.is_security_relevant());
			assert!(!AuditEventType::SessionExpired.is_security_relevant());
			assert!(!AuditEventType::ProductCreated.is_security_relevant());
			assert!(!AuditEventType::OrderDeleted.is_security_relevant());
			assert!(!AuditEventType::NewsletterSubscribed.is_security_relevant());
		}

		#[test]
		fn security_types_has_eleven_entries() {
			let types = AuditEventType::security_types();
			assert_eq!(types.len(), 11);
			for event in types {
				assert!(event.is_security_relevant());
			}
		}
	}

	mod user_id {
		use super::*;

		#[test]
		fn parses_valid_uuid() {
			let id = UserId::generate();
			let parsed: UserId = id.to_string().parse().unwrap();
			assert_eq!(id, parsed);
		}

		#[test]
		fn rejects_malformed_input() {
			let err = "not-a-uuid".parse::<UserId>().unwrap_err();
			assert!(matches!(err, AuditError::InvalidUserId(s) if s == "not-a-uuid"));
		}

		#[test]
		fn serializes_transparently() {
			let id = UserId::generate();
			let json = serde_json::to_string(&id).unwrap();
			assert_eq!(json, format!("\"{id}\""));
		}
	}

	mod audit_event_builder {
		use super::*;

		#[test]
		fn builds_minimal_input() {
			let event = AuditEventBuilder::new(AuditEventType::Logout).build();

			assert_eq!(event.event_type, AuditEventType::Logout);
			assert!(event.user_id.is_none());
			assert!(event.ip_address.is_none());
			assert!(event.user_agent.is_none());
			assert!(event.metadata.is_none());
			assert!(event.resource.is_none());
			assert!(event.action.is_none());
			assert!(event.success.is_none());
		}

		#[test]
		fn builds_full_input() {
			let user = UserId::generate();

			let event = NewAuditEvent::builder(AuditEventType::LoginFailed)
				.user(user)
				.ip_address("203.0.113.9")
				.user_agent("Mozilla/5.0")
				.metadata_entry("email", "alice@example.com")
				.resource("auth")
				.action("password login rejected")
				.success(false)
				.build();

			assert_eq!(event.event_type, AuditEventType::LoginFailed);
			assert_eq!(event.user_id, Some(user));
			assert_eq!(event.ip_address.as_deref(), Some("203.0.113.9"));
			assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
			assert_eq!(event.resource.as_deref(), Some("auth"));
			assert_eq!(event.action.as_deref(), Some("password login rejected"));
			assert_eq!(event.success, Some(false));

			let metadata = event.metadata.unwrap();
			assert_eq!(
				metadata.get("email").and_then(|v| v.as_str()),
				Some("alice@example.com")
			);
		}

		#[test]
		fn metadata_entry_keeps_existing_entries() {
			let event = NewAuditEvent::builder(AuditEventType::SuspiciousActivity)
				.metadata_entry("reason", "rate limit exceeded")
				.metadata_entry("attempts", 42)
				.build();

			let metadata = event.metadata.unwrap();
			assert_eq!(metadata.len(), 2);
			assert_eq!(
				metadata.get("reason").and_then(|v| v.as_str()),
				Some("rate limit exceeded")
			);
			assert_eq!(
				metadata.get("attempts").and_then(|v| v.as_i64()),
				Some(42)
			);
		}

		#[test]
		fn metadata_replaces_wholesale() {
			let mut replacement = Metadata::new();
			replacement.insert("order_id".to_string(), serde_json::Value::from("ord-77"));

			let event = NewAuditEvent::builder(AuditEventType::OrderCreated)
				.metadata_entry("stale", true)
				.metadata(replacement)
				.build();

			let metadata = event.metadata.unwrap();
			assert_eq!(metadata.len(), 1);
			assert!(metadata.contains_key("order_id"));
		}
	}

	mod audit_event {
		use super::*;

		#[test]
		fn serializes_to_json() {
			let event = AuditEvent {
				id: Uuid::new_v4(),
				timestamp: Utc::now(),
				event_type: AuditEventType::LoginSuccess,
				user_id: Some(UserId::generate()),
				ip_address: "192.168.1.1".to_string(),
				user_agent: "curl/8.0".to_string(),
				metadata: Metadata::new(),
				resource: None,
				action: None,
				success: true,
			};

			let json = serde_json::to_string(&event).unwrap();
			assert!(json.contains("\"event_type\":\"login_success\""));
			assert!(json.contains("\"ip_address\":\"192.168.1.1\""));
			assert!(json.contains("\"success\":true"));
		}

		#[test]
		fn deserializes_from_json() {
			let original = AuditEvent {
				id: Uuid::new_v4(),
				timestamp: Utc::now(),
				event_type: AuditEventType::CustomerUpdated,
				user_id: None,
				ip_address: "unknown".to_string(),
				user_agent: "unknown".to_string(),
				metadata: Metadata::new(),
				resource: Some("customer".to_string()),
				action: Some("updated billing address".to_string()),
				success: true,
			};

			let json = serde_json::to_string(&original).unwrap();
			let restored: AuditEvent = serde_json::from_str(&json).unwrap();

			assert_eq!(restored.id, original.id);
			assert_eq!(restored.event_type, AuditEventType::CustomerUpdated);
			assert_eq!(restored.resource, Some("customer".to_string()));
			assert_eq!(restored.action, Some("updated billing address".to_string()));
		}

		#[test]
		fn missing_metadata_defaults_to_empty() {
			let json = format!(
				r#"{{
					"id": "{}",
					"timestamp": "2025-06-01T00:00:00Z",
					"event_type": "logout",
					"user_id": null,
					"ip_address": "unknown",
					"user_agent": "unknown",
					"resource": null,
					"action": null,
					"success": true
				}}"#,
				Uuid::new_v4()
			);
			let event: AuditEvent = serde_json::from_str(&json).unwrap();
			assert!(event.metadata.is_empty());
		}
	}

	mod proptest_tests {
		use super::*;

		fn arb_event_type() -> impl Strategy<Value = AuditEventType> {
			proptest::sample::select(ALL_EVENT_TYPES.to_vec())
		}

		proptest! {
			#[test]
			fn event_type_serde_roundtrip(event in arb_event_type()) {
				let json = serde_json::to_string(&event).unwrap();
				let roundtrip: AuditEventType = serde_json::from_str(&json).unwrap();
				prop_assert_eq!(event, roundtrip);
			}

			#[test]
			fn event_type_display_parse_roundtrip(event in arb_event_type()) {
				let parsed: AuditEventType = event.to_string().parse().unwrap();
				prop_assert_eq!(event, parsed);
			}

			#[test]
			fn builder_with_arbitrary_strings(
				action in ".*",
				ip in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
				ua in "[ -~]{0,200}",
			) {
				let event = NewAuditEvent::builder(AuditEventType::LoginFailed)
					.action(&action)
					.ip_address(&ip)
					.user_agent(&ua)
					.build();

				prop_assert_eq!(event.action, Some(action));
				prop_assert_eq!(event.ip_address, Some(ip));
				prop_assert_eq!(event.user_agent, Some(ua));
			}
		}
	}
}
