// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Security monitoring over the Bramble audit store.
//!
//! [`SecurityMonitor`] turns the store's read operations into a
//! [`SecurityReport`] with four sections: recent failed logins,
//! suspicious source addresses, recent security events and aggregate
//! statistics. The [`runner`] module executes reports once or on an
//! interval.

pub mod error;
pub mod monitor;
mod render;
pub mod runner;

pub use error::MonitorError;
pub use monitor::{SecurityMonitor, SecurityReport};
pub use runner::{run_once, watch};
