// Copyright (c) 2025 Bramble. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Bramble services.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`BRAMBLE_*`)
//!
//! # Usage
//!
//! ```ignore
//! use bramble_config::load_config;
//!
//! let config = load_config()?;
//! println!("Audit database at {}", config.database.url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::BrambleConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct BrambleConfig {
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub audit: AuditConfig,
	pub monitor: MonitorConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`BRAMBLE_*`)
/// 2. Config file (`/etc/bramble/monitor.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<BrambleConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];

	sources.sort_by_key(|s| s.precedence());

	let mut merged = BrambleConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<BrambleConfig, ConfigError> {
	let mut merged = BrambleConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<BrambleConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];

	sources.sort_by_key(|s| s.precedence());

	let mut merged = BrambleConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: BrambleConfigLayer) -> Result<BrambleConfig, ConfigError> {
	let database = layer.database.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let audit = layer.audit.unwrap_or_default().finalize();
	let monitor = layer.monitor.unwrap_or_default().finalize();

	validate_config(&monitor)?;

	info!(
		database = %database.url,
		log_level = %logging.level,
		retention_days = audit.retention_days,
		interval_secs = monitor.interval_secs,
		suspicious_threshold = monitor.suspicious_threshold,
		"configuration loaded"
	);

	Ok(BrambleConfig {
		database,
		logging,
		audit,
		monitor,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(monitor: &MonitorConfig) -> Result<(), ConfigError> {
	if monitor.interval_secs == 0 {
		return Err(ConfigError::Validation(
			"BRAMBLE_MONITOR_INTERVAL_SECS must be at least 1. A zero interval \
			 would spin the watch loop without pause."
				.to_string(),
		));
	}

	if monitor.suspicious_threshold == 0 {
		return Err(ConfigError::Validation(
			"BRAMBLE_MONITOR_SUSPICIOUS_THRESHOLD must be at least 1. A zero \
			 threshold would flag every address that ever failed a login."
				.to_string(),
		));
	}

	if monitor.suspicious_sample == 0 {
		return Err(ConfigError::Validation(
			"BRAMBLE_MONITOR_SUSPICIOUS_SAMPLE must be at least 1.".to_string(),
		));
	}

	Ok(())
}
