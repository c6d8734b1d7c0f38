//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        EnvManager::load_env_file(self.cli.debug)?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config);

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if self.cli.count != crate::defaults::DEFAULT_RUN_COUNT {
            config.run_count = self.cli.count;
        }

        if self.cli.delay_ms != crate::defaults::DEFAULT_SETTLE_DELAY.as_millis() as u64 {
            config.settle_delay_ms = self.cli.delay_ms;
        }

        if self.cli.size != crate::defaults::DEFAULT_SIZE_CLASS {
            config.size_class = self.cli.size;
        }

        if let Some(ref session) = self.cli.session {
            config.map_session_id = Some(session.clone());
        }

        if let Some(ref session_file) = self.cli.session_file {
            config.session_file = session_file.clone();
        }

        if let Some(ref json) = self.cli.json {
            config.json_output = Some(json.clone());
        }

        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }

        // Verbose and debug are CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: run_count={}, settle_delay={}ms, size_class={}",
                config.run_count, config.settle_delay_ms, config.size_class
            );
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!(
        "Map Session: {}",
        config
            .map_session_id
            .as_deref()
            .unwrap_or("(from session file or newly created)")
    ));
    summary.push(format!("Session File: {}", config.session_file));
    summary.push(format!("Run Count: {}", config.run_count));
    summary.push(format!("Settle Delay: {}ms", config.settle_delay_ms));
    summary.push(format!("Size Class: {}", config.size_class));
    summary.push(format!(
        "JSON Output: {}",
        config.json_output.as_deref().unwrap_or("(disabled)")
    ));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
