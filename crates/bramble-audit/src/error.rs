// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
	#[error("invalid user ID: {0}")]
	InvalidUserId(String),

	#[error("unknown audit event type: {0}")]
	UnknownEventType(String),
}
