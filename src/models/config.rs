//! Configuration data model and validation

use crate::error::{AppError, Result};
use crate::generator::SizeClass;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit map/session identifier; `None` means create or join via the
    /// session file
    #[serde(default)]
    pub map_session_id: Option<String>,

    /// Path of the file the map identifier is persisted to
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Number of timed writes per run
    #[serde(default = "default_run_count")]
    pub run_count: u32,

    /// Settle delay between successive operations, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Simulated replication latency of the loopback map, in milliseconds
    #[serde(default = "default_propagation_delay_ms")]
    pub propagation_delay_ms: u64,

    /// Payload size class for the value generator
    #[serde(default = "default_size_class")]
    pub size_class: SizeClass,

    /// Write chart traces and the run record to this JSON file
    #[serde(default)]
    pub json_output: Option<String>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_session_id: None,
            session_file: default_session_file(),
            run_count: default_run_count(),
            settle_delay_ms: default_settle_delay_ms(),
            propagation_delay_ms: default_propagation_delay_ms(),
            size_class: default_size_class(),
            json_output: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Simulated propagation delay as a Duration
    pub fn propagation_delay(&self) -> Duration {
        Duration::from_millis(self.propagation_delay_ms)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.run_count == 0 {
            return Err(AppError::config("Run count must be greater than 0"));
        }

        if self.run_count > 10_000 {
            return Err(AppError::config("Run count cannot exceed 10000"));
        }

        if self.settle_delay_ms > 10_000 {
            return Err(AppError::config(
                "Settle delay cannot exceed 10000 milliseconds",
            ));
        }

        if self.session_file.is_empty() {
            return Err(AppError::config("Session file path cannot be empty"));
        }

        if let Some(ref id) = self.map_session_id {
            if id.trim().is_empty() {
                return Err(AppError::config("Map session identifier cannot be blank"));
            }
        }

        Ok(())
    }

    /// Merge environment variable values into this configuration.
    ///
    /// CLI overrides are applied afterwards by the parser, so the
    /// precedence ends up defaults < environment < CLI.
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(id) = std::env::var("MAP_SESSION_ID") {
            if !id.trim().is_empty() {
                self.map_session_id = Some(id.trim().to_string());
            }
        }

        if let Ok(value) = std::env::var("RUN_COUNT") {
            self.run_count = value
                .parse()
                .map_err(|_| AppError::config(format!("Invalid RUN_COUNT value: {}", value)))?;
        }

        if let Ok(value) = std::env::var("SETTLE_DELAY_MS") {
            self.settle_delay_ms = value.parse().map_err(|_| {
                AppError::config(format!("Invalid SETTLE_DELAY_MS value: {}", value))
            })?;
        }

        if let Ok(value) = std::env::var("SIZE_CLASS") {
            self.size_class = value.parse()?;
        }

        if let Ok(value) = std::env::var("ENABLE_COLOR") {
            self.enable_color = match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => {
                    return Err(AppError::config(format!(
                        "Invalid ENABLE_COLOR value: {}",
                        other
                    )))
                }
            };
        }

        Ok(())
    }
}

fn default_session_file() -> String {
    crate::defaults::DEFAULT_SESSION_FILE.to_string()
}

fn default_run_count() -> u32 {
    crate::defaults::DEFAULT_RUN_COUNT
}

fn default_settle_delay_ms() -> u64 {
    crate::defaults::DEFAULT_SETTLE_DELAY.as_millis() as u64
}

fn default_propagation_delay_ms() -> u64 {
    crate::defaults::DEFAULT_PROPAGATION_DELAY_MS
}

fn default_size_class() -> SizeClass {
    crate::defaults::DEFAULT_SIZE_CLASS
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
