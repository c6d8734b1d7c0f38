//! Console report formatting
//!
//! A formatter turns a finished run record into the text printed on the
//! terminal. Plain and colored variants share one trait so the caller
//! never branches on color support.

use crate::error::AppError;
use crate::models::{Config, RunRecord};
use crate::stats::StatsSummary;

/// Formats run results for console display
pub trait OutputFormatter: Send + Sync {
    /// Banner printed before a run starts
    fn format_header(&self, config: &Config) -> String;

    /// Progress line emitted after each confirmed write
    fn format_progress(&self, key: &str, confirmed: usize, expected: usize) -> String;

    /// Full report for a finished run
    fn format_run_summary(&self, record: &RunRecord) -> String;

    /// Error message with category prefix
    fn format_error(&self, error: &AppError) -> String;

    /// Informational success line
    fn format_success(&self, message: &str) -> String;

    /// Warning line
    fn format_warning(&self, message: &str) -> String;
}

/// Plain-text formatter without ANSI escapes
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the statistics table rows shared by both formatters.
pub(crate) fn stats_rows(summary: &StatsSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Max", format!("{:.1}", summary.max)),
        ("Upper fence", format!("{:.1}", summary.upper_fence)),
        ("Q3", format!("{:.1}", summary.q3)),
        ("Mean", format!("{:.1}", summary.mean)),
        ("Median", format!("{:.1}", summary.median)),
        ("Q1", format!("{:.1}", summary.q1)),
        ("Lower fence", format!("{:.1}", summary.lower_fence)),
        ("Min", format!("{:.1}", summary.min)),
        ("IQR", format!("{:.1}", summary.iqr())),
    ]
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, config: &Config) -> String {
        let mut lines = vec![
            "Map Latency Bench".to_string(),
            "=================".to_string(),
            format!("Writes:       {}", config.run_count),
            format!("Settle delay: {}ms", config.settle_delay_ms),
            format!("Size class:   {}", config.size_class),
        ];
        if let Some(ref id) = config.map_session_id {
            lines.push(format!("Session:      {}", id));
        }
        lines.join("\n")
    }

    fn format_progress(&self, key: &str, confirmed: usize, expected: usize) -> String {
        format!("confirmed {}/{} (key {})", confirmed, expected, key)
    }

    fn format_run_summary(&self, record: &RunRecord) -> String {
        let mut out = Vec::new();
        out.push(String::new());
        out.push(format!("Map: {}", record.map_id));
        out.push(record.payload_message());
        out.push(record.latency_message());

        if let Some(ref summary) = record.summary {
            out.push(String::new());
            out.push(format!(
                "{:<14} {:>10}",
                "Statistic", "Value (ms)"
            ));
            out.push(format!("{:-<14} {:->10}", "", ""));
            for (label, value) in stats_rows(summary) {
                out.push(format!("{:<14} {:>10}", label, value));
            }
            let (low, high) = summary.whiskers();
            out.push(format!(
                "{:<14} {:>10}",
                "Whiskers",
                format!("{:.1}..{:.1}", low, high)
            ));
            let outliers = summary.outliers(&record.duration_values());
            out.push(format!("{:<14} {:>10}", "Outliers", outliers.len()));
            out.push(format!(
                "{:<14} {:>10}",
                "Samples", summary.sample_count
            ));
        } else {
            out.push("No completed measurements".to_string());
        }

        if !record.incomplete_keys.is_empty() {
            out.push(format!(
                "Warning: {} confirmation(s) without a recorded start: {}",
                record.incomplete_keys.len(),
                record.incomplete_keys.join(", ")
            ));
        }

        out.join("\n")
    }

    fn format_error(&self, error: &AppError) -> String {
        format!("[{}] {}", error.category(), error)
    }

    fn format_success(&self, message: &str) -> String {
        format!("OK: {}", message)
    }

    fn format_warning(&self, message: &str) -> String {
        format!("Warning: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SizeClass;

    fn finished_record() -> RunRecord {
        let mut record = RunRecord::new("room-1".to_string(), SizeClass::Zero);
        record.finalize(
            vec![
                ("0".to_string(), 10),
                ("1".to_string(), 20),
                ("2".to_string(), 30),
                ("3".to_string(), 40),
            ],
            vec![],
            vec![3, 4, 2, 3],
        );
        record
    }

    #[test]
    fn test_plain_summary_contains_quartiles() {
        let formatter = PlainFormatter::new();
        let text = formatter.format_run_summary(&finished_record());
        assert!(text.contains("Median"));
        assert!(text.contains("25.0"));
        assert!(text.contains("17.5"));
        assert!(text.contains("32.5"));
        assert!(text.contains("room-1"));
    }

    #[test]
    fn test_plain_summary_empty_run() {
        let mut record = RunRecord::new("room-1".to_string(), SizeClass::Zero);
        record.finalize(vec![], vec![], vec![]);
        let formatter = PlainFormatter::new();
        let text = formatter.format_run_summary(&record);
        assert!(text.contains("No completed measurements"));
    }

    #[test]
    fn test_incomplete_keys_surfaced() {
        let mut record = RunRecord::new("room-1".to_string(), SizeClass::Zero);
        record.finalize(
            vec![("0".to_string(), 10)],
            vec!["7".to_string()],
            vec![2],
        );
        let formatter = PlainFormatter::new();
        let text = formatter.format_run_summary(&record);
        assert!(text.contains("without a recorded start"));
        assert!(text.contains('7'));
    }

    #[test]
    fn test_progress_line() {
        let formatter = PlainFormatter::new();
        assert_eq!(
            formatter.format_progress("4", 5, 100),
            "confirmed 5/100 (key 4)"
        );
    }
}
