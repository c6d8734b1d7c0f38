//! Output formatting and chart trace construction

pub mod colored;
pub mod formatter;
pub mod trace;

pub use colored::ColoredFormatter;
pub use formatter::{OutputFormatter, PlainFormatter};
pub use trace::{ChartBundle, Layout, ScatterTrace};

/// Factory for creating the appropriate formatter
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color preference
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_formatter() {
        // Both variants must satisfy the trait object
        let _plain = OutputFormatterFactory::create_formatter(false);
        let _colored = OutputFormatterFactory::create_formatter(true);
    }
}
