// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration assembled by merging layered sources.

use serde::Deserialize;

use crate::sections::{
	AuditConfigLayer, DatabaseConfigLayer, LoggingConfigLayer, MonitorConfigLayer,
};

/// Partial configuration (all fields optional, for merging).
///
/// Sections merge field-wise: a later source only overrides the fields
/// it actually sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrambleConfigLayer {
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub audit: Option<AuditConfigLayer>,
	#[serde(default)]
	pub monitor: Option<MonitorConfigLayer>,
}

impl BrambleConfigLayer {
	pub fn merge(&mut self, other: BrambleConfigLayer) {
		if let Some(other_database) = other.database {
			match &mut self.database {
				Some(database) => database.merge(other_database),
				None => self.database = Some(other_database),
			}
		}
		if let Some(other_logging) = other.logging {
			match &mut self.logging {
				Some(logging) => logging.merge(other_logging),
				None => self.logging = Some(other_logging),
			}
		}
		if let Some(other_audit) = other.audit {
			match &mut self.audit {
				Some(audit) => audit.merge(other_audit),
				None => self.audit = Some(other_audit),
			}
		}
		if let Some(other_monitor) = other.monitor {
			match &mut self.monitor {
				Some(monitor) => monitor.merge(other_monitor),
				None => self.monitor = Some(other_monitor),
			}
		}
	}
}
