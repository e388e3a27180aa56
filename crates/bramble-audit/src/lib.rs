// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit event model shared by the Bramble services.
//!
//! Every security-relevant action in the platform is recorded as an
//! [`AuditEvent`]. This crate defines the event vocabulary and the input
//! shape used to record new events; persistence lives in
//! `bramble-audit-store`.

pub mod error;
pub mod event;

pub use error::AuditError;
pub use event::{
	AuditEvent, AuditEventBuilder, AuditEventType, Metadata, NewAuditEvent, UserId,
};
