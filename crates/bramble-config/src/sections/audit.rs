// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit retention configuration section.

use serde::{Deserialize, Serialize};

const DEFAULT_RETENTION_DAYS: i64 = 90;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditConfigLayer {
	pub retention_days: Option<i64>,
}

impl AuditConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.retention_days.is_some() {
			self.retention_days = other.retention_days;
		}
	}

	pub fn finalize(self) -> AuditConfig {
		AuditConfig {
			retention_days: self.retention_days.unwrap_or(DEFAULT_RETENTION_DAYS),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditConfig {
	/// Events older than this many days are eligible for cleanup.
	pub retention_days: i64,
}

impl Default for AuditConfig {
	fn default() -> Self {
		Self {
			retention_days: DEFAULT_RETENTION_DAYS,
		}
	}
}
