// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bramble_audit_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
	#[error("audit store error: {0}")]
	Store(#[from] StoreError),
}
