// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use bramble_audit_store::{create_pool, run_migrations, SqliteAuditStore};
use bramble_config::BrambleConfig;
use bramble_monitor::{runner, SecurityMonitor};

/// Security report generator for the Bramble audit log.
#[derive(Debug, Parser)]
#[command(name = "bramble-monitor", version, about)]
struct Args {
	/// Repeat the report on the configured interval until interrupted.
	#[arg(long)]
	watch: bool,

	/// Restrict the failed-login section to one source address.
	#[arg(long, value_name = "ADDRESS")]
	ip: Option<String>,

	/// Load configuration from this file instead of the system path.
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenvy::dotenv().ok();

	let args = Args::parse();

	let config = match &args.config {
		Some(path) => bramble_config::load_config_with_file(path)?,
		None => bramble_config::load_config()?,
	};

	init_tracing(&config);

	let pool = create_pool(&config.database.url)
		.await
		.context("failed to open audit database")?;
	run_migrations(&pool)
		.await
		.context("failed to apply audit schema")?;

	let store = Arc::new(SqliteAuditStore::new(pool));
	let mut monitor = SecurityMonitor::new(store, config.monitor.clone());
	if let Some(ip) = args.ip {
		monitor = monitor.with_ip_filter(ip);
	}

	if args.watch {
		runner::watch(&monitor).await;
	} else {
		runner::run_once(&monitor).await?;
	}

	Ok(())
}

fn init_tracing(config: &BrambleConfig) {
	tracing_subscriber::registry()
		.with(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();
}
