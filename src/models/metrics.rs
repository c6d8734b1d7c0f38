//! Run record data model
//!
//! A [`RunRecord`] captures everything one run produced: the per-key
//! round-trip durations in the order their confirmations arrived, the
//! payload sizes written, and the derived statistical summary.

use crate::generator::SizeClass;
use crate::stats::{byte_range, StatsSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Results of one completed benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Identifier of the logical map the run was measured against
    pub map_id: String,

    /// Payload size class the value generator was configured with
    pub size_class: u32,

    /// Key → round-trip duration in milliseconds, in confirmation order
    pub durations: Vec<(String, i64)>,

    /// Keys whose end was observed without a matching start (skipped from
    /// the durations; should be empty in a healthy run)
    pub incomplete_keys: Vec<String>,

    /// UTF-8 byte length of each written payload, in issue order
    pub payload_samples: Vec<usize>,

    /// When the write loop started
    pub started_at: DateTime<Utc>,

    /// When the final confirmation arrived
    pub completed_at: Option<DateTime<Utc>>,

    /// Distributional summary of the durations; `None` when no durations
    /// were recorded
    pub summary: Option<StatsSummary>,
}

impl RunRecord {
    /// Create a record for a run that is about to start.
    pub fn new(map_id: String, size_class: SizeClass) -> Self {
        Self {
            map_id,
            size_class: size_class.as_u32(),
            durations: Vec::new(),
            incomplete_keys: Vec::new(),
            payload_samples: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
            summary: None,
        }
    }

    /// Fill in measured durations and derive the summary.
    pub fn finalize(
        &mut self,
        durations: Vec<(String, i64)>,
        incomplete_keys: Vec<String>,
        payload_samples: Vec<usize>,
    ) {
        self.summary = StatsSummary::from_durations(
            &durations.iter().map(|(_, d)| *d as f64).collect::<Vec<_>>(),
        );
        self.durations = durations;
        self.incomplete_keys = incomplete_keys;
        self.payload_samples = payload_samples;
        self.completed_at = Some(Utc::now());
    }

    /// Durations as floating-point milliseconds, in confirmation order.
    pub fn duration_values(&self) -> Vec<f64> {
        self.durations.iter().map(|(_, d)| *d as f64).collect()
    }

    /// Operation keys in confirmation order.
    pub fn duration_keys(&self) -> Vec<String> {
        self.durations.iter().map(|(k, _)| k.clone()).collect()
    }

    /// One-line latency span, empty when no durations were measured.
    pub fn latency_message(&self) -> String {
        match self.summary.as_ref() {
            Some(s) => format!("min: {:.0} ms, max: {:.0} ms", s.min, s.max),
            None => String::new(),
        }
    }

    /// One-line payload span, empty when no payloads were written.
    pub fn payload_message(&self) -> String {
        match byte_range(&self.payload_samples) {
            Some((min, max)) => format!("min: {} bytes, max: {} bytes", min, max),
            None => String::new(),
        }
    }
}
