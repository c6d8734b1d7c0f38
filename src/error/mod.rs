//! Error handling for the map latency benchmark

use thiserror::Error;

/// Custom error types for the map latency benchmark
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A run was requested before the map views finished initializing
    #[error("Map not ready: {0}")]
    NotReady(String),

    /// Errors reported by the shared property map collaborator
    #[error("Map operation error: {0}")]
    Map(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// I/O errors (session file, JSON export, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (size classes, env values, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new not-ready error
    pub fn not_ready<S: Into<String>>(message: S) -> Self {
        Self::NotReady(message.into())
    }

    /// Create a new map operation error
    pub fn map<S: Into<String>>(message: S) -> Self {
        Self::Map(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::NotReady(_) => "NOT_READY",
            Self::Map(_) => "MAP",
            Self::Validation(_) => "VALIDATION",
            Self::Statistics(_) => "STATS",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is recoverable (the user can simply retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NotReady(_) | Self::Map(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => false,
            Self::Statistics(_) | Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::NotReady(msg) => {
                format!("Map not ready: {}\n\nSuggestion: The map views are still initializing. Wait a moment and retry.", msg)
            }
            Self::Map(msg) => {
                format!("Map operation failed: {}\n\nSuggestion: The shared map collaborator rejected the operation. This run's measurements are incomplete.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the run count, settle delay, and size class values.", msg)
            }
            Self::Statistics(msg) => {
                format!("Statistics calculation failed: {}\n\nSuggestion: This may indicate insufficient or invalid measurement data.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check the format of your input or configuration values.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::NotReady(_) => 2,
            Self::Map(_) => 3,
            Self::Io(_) => 5,
            Self::Statistics(_) => 6,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::NotReady(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Map(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Statistics(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
