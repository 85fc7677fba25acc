//! Configuration module for the Ember ordering system.
//!
//! This module provides structures and utilities for managing the demo
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all timing ranges are sane before any
//! service is built from them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the ordering demo.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
	/// Identity of the restaurant instance.
	#[serde(default)]
	pub restaurant: RestaurantConfig,
	/// Timing parameters for checkout and the progression simulator.
	#[serde(default)]
	pub timing: TimingConfig,
	/// Order store behaviour.
	#[serde(default)]
	pub store: StoreConfig,
}

/// Identity of the restaurant instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestaurantConfig {
	/// Unique identifier for this instance.
	#[serde(default = "default_restaurant_id")]
	pub id: String,
	/// Display name used in logs and the dashboard header.
	#[serde(default = "default_restaurant_name")]
	pub name: String,
}

impl Default for RestaurantConfig {
	fn default() -> Self {
		Self {
			id: default_restaurant_id(),
			name: default_restaurant_name(),
		}
	}
}

fn default_restaurant_id() -> String {
	"ember-demo".to_string()
}

fn default_restaurant_name() -> String {
	"Ember".to_string()
}

/// Timing parameters for checkout and the progression simulator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
	/// Artificial checkout latency in milliseconds.
	/// Defaults to 1000 ms to simulate order placement over a network.
	#[serde(default = "default_placement_latency_ms")]
	pub placement_latency_ms: u64,
	/// Minimum delay between automatic status steps, in seconds.
	#[serde(default = "default_step_delay_min_secs")]
	pub step_delay_min_secs: u64,
	/// Maximum delay between automatic status steps, in seconds.
	#[serde(default = "default_step_delay_max_secs")]
	pub step_delay_max_secs: u64,
	/// Lower bound of the randomized preparation estimate, in minutes.
	#[serde(default = "default_estimate_min_minutes")]
	pub estimate_min_minutes: u32,
	/// Upper bound (exclusive) of the randomized preparation estimate.
	#[serde(default = "default_estimate_max_minutes")]
	pub estimate_max_minutes: u32,
	/// Seed for the randomized estimate and step jitter. When unset, each
	/// run draws from entropy; tests set it to pin deterministic values.
	#[serde(default)]
	pub rng_seed: Option<u64>,
}

impl Default for TimingConfig {
	fn default() -> Self {
		Self {
			placement_latency_ms: default_placement_latency_ms(),
			step_delay_min_secs: default_step_delay_min_secs(),
			step_delay_max_secs: default_step_delay_max_secs(),
			estimate_min_minutes: default_estimate_min_minutes(),
			estimate_max_minutes: default_estimate_max_minutes(),
			rng_seed: None,
		}
	}
}

/// Returns the default checkout latency in milliseconds.
fn default_placement_latency_ms() -> u64 {
	1000
}

/// Returns the default minimum automatic step delay in seconds.
fn default_step_delay_min_secs() -> u64 {
	8
}

/// Returns the default maximum automatic step delay in seconds.
fn default_step_delay_max_secs() -> u64 {
	15
}

/// Returns the default lower bound of the preparation estimate in minutes.
fn default_estimate_min_minutes() -> u32 {
	15
}

/// Returns the default upper bound of the preparation estimate in minutes.
fn default_estimate_max_minutes() -> u32 {
	30
}

/// Order store behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
	/// Whether to pre-populate the store with representative demo orders.
	#[serde(default = "default_seed_demo_orders")]
	pub seed_demo_orders: bool,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			seed_demo_orders: default_seed_demo_orders(),
		}
	}
}

fn default_seed_demo_orders() -> bool {
	true
}

impl Config {
	/// Parses a configuration from a TOML string and validates it.
	pub fn from_str(raw: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads a configuration from a TOML file and validates it.
	pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		Self::from_str(&raw)
	}

	/// Checks that all configured values are usable.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.restaurant.id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"restaurant.id must not be empty".to_string(),
			));
		}
		if self.timing.step_delay_max_secs < self.timing.step_delay_min_secs {
			return Err(ConfigError::Validation(format!(
				"timing.step_delay_max_secs ({}) must not be below timing.step_delay_min_secs ({})",
				self.timing.step_delay_max_secs, self.timing.step_delay_min_secs
			)));
		}
		if self.timing.step_delay_min_secs == 0 {
			return Err(ConfigError::Validation(
				"timing.step_delay_min_secs must be at least 1".to_string(),
			));
		}
		if self.timing.estimate_max_minutes <= self.timing.estimate_min_minutes {
			return Err(ConfigError::Validation(format!(
				"timing.estimate_max_minutes ({}) must exceed timing.estimate_min_minutes ({})",
				self.timing.estimate_max_minutes, self.timing.estimate_min_minutes
			)));
		}
		Ok(())
	}
}
