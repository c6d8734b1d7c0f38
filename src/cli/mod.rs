//! Command-line interface module

use crate::generator::SizeClass;
use clap::Parser;

/// Map Latency Bench - measures write-to-confirmation latency of a replicated shared property map
#[derive(Parser, Debug, Clone)]
#[command(name = "map-latency-bench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of timed writes per run
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_RUN_COUNT)]
    pub count: u32,

    /// Settle delay between operations in milliseconds
    #[arg(short = 'd', long = "delay-ms", default_value_t = crate::defaults::DEFAULT_SETTLE_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Payload size class (0, 1, 5 or 10)
    #[arg(short = 's', long, default_value = "0", value_parser = parse_size_class)]
    pub size: SizeClass,

    /// Join an existing logical map by identifier
    #[arg(long)]
    pub session: Option<String>,

    /// Path of the session file persisting the map identifier
    #[arg(long = "session-file")]
    pub session_file: Option<String>,

    /// Discard the persisted session and create a fresh map
    #[arg(long)]
    pub fresh: bool,

    /// Write chart traces and the run record to this JSON file
    #[arg(long)]
    pub json: Option<String>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.fresh && self.session.is_some() {
            return Err("Cannot specify both --fresh and --session".to_string());
        }

        if let Some(ref session) = self.session {
            if session.trim().is_empty() {
                return Err("Session identifier cannot be blank".to_string());
            }
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Parse a size class argument
fn parse_size_class(s: &str) -> Result<SizeClass, String> {
    s.parse::<SizeClass>().map_err(|e| e.to_string())
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
