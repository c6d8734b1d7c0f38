//! Colored console formatting using ANSI escapes

use crate::error::AppError;
use crate::models::{Config, RunRecord};
use crate::output::formatter::{stats_rows, OutputFormatter};
use colored::Colorize;

/// ANSI-colored formatter for interactive terminals
pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, config: &Config) -> String {
        let mut lines = vec![
            "Map Latency Bench".bold().cyan().to_string(),
            "=================".cyan().to_string(),
            format!("Writes:       {}", config.run_count.to_string().bold()),
            format!("Settle delay: {}ms", config.settle_delay_ms),
            format!("Size class:   {}", config.size_class),
        ];
        if let Some(ref id) = config.map_session_id {
            lines.push(format!("Session:      {}", id.yellow()));
        }
        lines.join("\n")
    }

    fn format_progress(&self, key: &str, confirmed: usize, expected: usize) -> String {
        format!(
            "{} {}/{} (key {})",
            "confirmed".green(),
            confirmed,
            expected,
            key
        )
    }

    fn format_run_summary(&self, record: &RunRecord) -> String {
        let mut out = Vec::new();
        out.push(String::new());
        out.push(format!("Map: {}", record.map_id.yellow()));
        out.push(record.payload_message());
        out.push(record.latency_message().bold().to_string());

        if let Some(ref summary) = record.summary {
            out.push(String::new());
            out.push(format!(
                "{:<14} {:>10}",
                "Statistic".bold(),
                "Value (ms)".bold()
            ));
            out.push(format!("{:-<14} {:->10}", "", ""));
            for (label, value) in stats_rows(summary) {
                let value = if label == "Median" {
                    value.bold().green().to_string()
                } else {
                    value
                };
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
            out.push(format!("{:<14} {:>10}", "Samples", summary.sample_count));
        } else {
            out.push("No completed measurements".red().to_string());
        }

        if !record.incomplete_keys.is_empty() {
            out.push(
                format!(
                    "Warning: {} confirmation(s) without a recorded start: {}",
                    record.incomplete_keys.len(),
                    record.incomplete_keys.join(", ")
                )
                .yellow()
                .to_string(),
            );
        }

        out.join("\n")
    }

    fn format_error(&self, error: &AppError) -> String {
        error.format_for_console(true)
    }

    fn format_success(&self, message: &str) -> String {
        format!("{} {}", "OK:".green().bold(), message)
    }

    fn format_warning(&self, message: &str) -> String {
        format!("{} {}", "Warning:".yellow().bold(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SizeClass;

    #[test]
    fn test_colored_summary_has_content() {
        let mut record = RunRecord::new("room-2".to_string(), SizeClass::One);
        record.finalize(
            vec![("0".to_string(), 10), ("1".to_string(), 30)],
            vec![],
            vec![800, 801],
        );
        let formatter = ColoredFormatter::new();
        let text = formatter.format_run_summary(&record);
        assert!(text.contains("room-2"));
        assert!(text.contains("Median"));
        assert!(text.contains("Samples"));
    }

    #[test]
    fn test_colored_error_uses_category() {
        let formatter = ColoredFormatter::new();
        let err = AppError::not_ready("run already in progress");
        let text = formatter.format_error(&err);
        assert!(text.contains("run already in progress"));
    }
}
