// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-shot and continuous execution of the security monitor.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::error::MonitorError;
use crate::monitor::SecurityMonitor;

/// Collect and print a single report. Errors propagate to the caller.
pub async fn run_once(monitor: &SecurityMonitor) -> Result<(), MonitorError> {
	let report = monitor.collect().await?;
	println!("{report}");
	Ok(())
}

/// One watch-mode cycle: collect and print, logging failures instead
/// of returning them. Returns whether the cycle succeeded.
async fn run_cycle(monitor: &SecurityMonitor) -> bool {
	match monitor.collect().await {
		Ok(report) => {
			println!("{report}");
			true
		}
		Err(e) => {
			error!(error = %e, "report cycle failed");
			false
		}
	}
}

/// Repeat report cycles until Ctrl-C.
///
/// A failed cycle never stops the loop; the next tick runs on
/// schedule. Ticks fire relative to the previous tick's start, with
/// the first cycle running immediately.
pub async fn watch(monitor: &SecurityMonitor) {
	let interval_secs = monitor.config().interval_secs;
	let mut ticker = interval(Duration::from_secs(interval_secs));
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	info!(interval_secs, "watch mode started");

	loop {
		tokio::select! {
			_ = ticker.tick() => {
				run_cycle(monitor).await;
			}
			_ = tokio::signal::ctrl_c() => {
				info!("shutdown signal received, stopping watch");
				break;
			}
		}
	}
}
