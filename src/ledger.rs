//! Timing ledger recording per-key start/end timestamps
//!
//! The ledger is the bookkeeping half of a measurement cycle: the sequencer
//! records a start timestamp when it issues a write, and the remote view's
//! change notification records the end timestamp for the same key. Durations
//! are always derived from the two timestamp sets, never stored.

use std::collections::HashMap;

/// Integer milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// Current wall-clock time in milliseconds since the epoch.
pub fn now_ms() -> TimestampMs {
    chrono::Utc::now().timestamp_millis()
}

/// Records start and end timestamps per operation key and derives durations.
///
/// Keys are remembered in first-insertion order so that cleanup and reporting
/// walk operations in the order they were issued.
#[derive(Debug, Default)]
pub struct TimingLedger {
    start_times: HashMap<String, TimestampMs>,
    end_times: HashMap<String, TimestampMs>,
    /// Keys in the order their start was first recorded.
    start_order: Vec<String>,
    /// Keys in the order their end was first recorded.
    end_order: Vec<String>,
}

impl TimingLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start timestamp for a key.
    ///
    /// Overwrites any previous start for the same key; reruns against the
    /// same key set are expected and not an error.
    pub fn record_start(&mut self, key: &str, time: TimestampMs) {
        if self.start_times.insert(key.to_string(), time).is_none() {
            self.start_order.push(key.to_string());
        }
    }

    /// Record the end timestamp for a key, overwriting any previous end.
    pub fn record_end(&mut self, key: &str, time: TimestampMs) {
        if self.end_times.insert(key.to_string(), time).is_none() {
            self.end_order.push(key.to_string());
        }
    }

    /// Derive durations for every key with a recorded end timestamp.
    ///
    /// Pure function of the recorded timestamps: each call recomputes from
    /// scratch. An end with no matching start is skipped here and surfaced
    /// through [`incomplete_keys`](Self::incomplete_keys) instead of
    /// producing an undefined duration.
    pub fn durations(&self) -> Vec<(String, i64)> {
        self.end_order
            .iter()
            .filter_map(|key| {
                let end = self.end_times.get(key)?;
                let start = self.start_times.get(key)?;
                Some((key.clone(), end - start))
            })
            .collect()
    }

    /// Keys with an end timestamp but no recorded start.
    pub fn incomplete_keys(&self) -> Vec<String> {
        self.end_order
            .iter()
            .filter(|key| !self.start_times.contains_key(*key))
            .cloned()
            .collect()
    }

    /// Keys with a recorded start, in insertion order.
    ///
    /// This is the key set the cleanup pass walks before the next run.
    pub fn started_keys(&self) -> Vec<String> {
        self.start_order.clone()
    }

    /// Number of keys with a recorded start.
    pub fn started_count(&self) -> usize {
        self.start_order.len()
    }

    /// Number of keys with a recorded end.
    pub fn completed_count(&self) -> usize {
        self.end_order.len()
    }

    /// Discard all recorded timestamps. Called at the start of a new run.
    pub fn clear(&mut self) {
        self.start_times.clear();
        self.end_times.clear();
        self.start_order.clear();
        self.end_order.clear();
    }
}
