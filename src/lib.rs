//! Map Latency Bench
//!
//! Measures the local-write to remote-confirmation latency of a
//! replicated shared property map. A run writes a sequence of numbered
//! keys with randomized payloads, records a start timestamp per write,
//! and a remote view's change events provide the matching end
//! timestamps. The resulting durations feed quartile statistics with
//! Tukey outlier fences and chart traces for a rendering collaborator.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod logging;
pub mod map;
pub mod models;
pub mod output;
pub mod sequencer;
pub mod session;
pub mod stats;

// Re-export main types for convenience
pub use cli::Cli;
pub use error::{AppError, Result};
pub use generator::{GeneratedValue, PayloadGenerator, SizeClass, ValueGenerator};
pub use ledger::{now_ms, TimingLedger};
pub use map::{MapEvent, SharedPropertyMap};
pub use models::{Config, RunRecord};
pub use sequencer::{CompletionTracker, RunEvent, RunState, Sequencer, SequencerConfig};
pub use session::{SessionIdentity, SessionStore};
pub use stats::StatsSummary;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default values used across configuration layers
pub mod defaults {
    use crate::generator::SizeClass;
    use std::time::Duration;

    /// Number of timed writes per run
    pub const DEFAULT_RUN_COUNT: u32 = 100;

    /// Settle delay between sequenced operations
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

    /// Payload size class
    pub const DEFAULT_SIZE_CLASS: SizeClass = SizeClass::Zero;

    /// Session file persisting the map identifier between runs
    pub const DEFAULT_SESSION_FILE: &str = ".mlb-session";

    /// Simulated propagation delay of the loopback hub in milliseconds
    pub const DEFAULT_PROPAGATION_DELAY_MS: u64 = 5;

    /// Colored output enabled by default
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
