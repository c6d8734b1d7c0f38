//! Environment file and variable handling

use crate::error::{AppError, Result};
use crate::generator::SizeClass;
use std::path::Path;

/// Manages `.env` file loading and environment variable validation
pub struct EnvManager;

impl EnvManager {
    /// Load the `.env` file if one exists in the working directory.
    pub fn load_env_file(debug: bool) -> Result<()> {
        match dotenv::dotenv() {
            Ok(path) => {
                if debug {
                    println!("Loaded environment file: {}", path.display());
                }
                Ok(())
            }
            Err(dotenv::Error::Io(_)) => {
                // No .env file is fine
                Ok(())
            }
            Err(e) => Err(AppError::config(format!(
                "Failed to load .env file: {}",
                e
            ))),
        }
    }

    /// Validate a single environment variable value by name.
    pub fn validate_env_var(name: &str, value: &str) -> Result<()> {
        match name {
            "MAP_SESSION_ID" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("MAP_SESSION_ID cannot be blank"));
                }
                Ok(())
            }
            "RUN_COUNT" => {
                let count: u32 = value
                    .parse()
                    .map_err(|_| AppError::config(format!("Invalid RUN_COUNT: {}", value)))?;
                if count == 0 || count > 10_000 {
                    return Err(AppError::config("RUN_COUNT must be in 1..=10000"));
                }
                Ok(())
            }
            "SETTLE_DELAY_MS" => {
                let delay: u64 = value.parse().map_err(|_| {
                    AppError::config(format!("Invalid SETTLE_DELAY_MS: {}", value))
                })?;
                if delay > 10_000 {
                    return Err(AppError::config("SETTLE_DELAY_MS cannot exceed 10000"));
                }
                Ok(())
            }
            "SIZE_CLASS" => {
                value.parse::<SizeClass>()?;
                Ok(())
            }
            "ENABLE_COLOR" => match value.to_lowercase().as_str() {
                "true" | "false" | "1" | "0" | "yes" | "no" => Ok(()),
                _ => Err(AppError::config(format!(
                    "Invalid ENABLE_COLOR: {}",
                    value
                ))),
            },
            _ => Ok(()),
        }
    }

    /// Content of an example `.env` file documenting the supported keys.
    pub fn create_example_env_content() -> String {
        [
            "# Map Latency Bench Configuration",
            "#",
            "# Identifier of the logical map to join; omit to create a new map",
            "# MAP_SESSION_ID=",
            "",
            "# Number of timed writes per run (1-10000)",
            "RUN_COUNT=100",
            "",
            "# Settle delay between operations in milliseconds (0-10000)",
            "SETTLE_DELAY_MS=100",
            "",
            "# Payload size class: 0, 1, 5 or 10",
            "SIZE_CLASS=0",
            "",
            "# Colored terminal output",
            "ENABLE_COLOR=true",
            "",
        ]
        .join("\n")
    }

    /// Write the example `.env` content to `path`.
    pub fn save_example_env_file<P: AsRef<Path>>(path: P) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content())?;
        Ok(())
    }
}
