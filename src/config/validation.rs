//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{ApiConfig, DashboardConfig, FileSettings, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Longest debounce window accepted, in milliseconds
const MAX_DEBOUNCE_MS: u64 = 10_000;

impl ApiConfig {
    /// Validate player service settings
    ///
    /// # Validation Rules
    /// - Base URL must be an absolute http(s) URL
    /// - Request and connect timeouts must be greater than 0
    /// - Connect timeout must not exceed the request timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "api.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "api.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout > self.request_timeout {
            return Err(ConfigError::validation(
                "api.connect_timeout",
                format!(
                    "Connect timeout ({}s) cannot exceed request timeout ({}s).",
                    self.connect_timeout, self.request_timeout
                ),
            ));
        }

        Ok(())
    }
}

impl DashboardConfig {
    /// Validate dashboard settings
    ///
    /// # Validation Rules
    /// - Page size must be greater than 0
    /// - Page size options must be non-empty and contain only positive sizes
    /// - Debounce window must not exceed 10 seconds
    /// - State file path must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::validation(
                "dashboard.page_size",
                "Page size must be greater than 0.",
            ));
        }

        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(ConfigError::validation(
                "dashboard.page_size_options",
                "Page size options must list at least one size, all greater than 0.",
            ));
        }

        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::validation(
                "dashboard.debounce_ms",
                format!(
                    "Debounce window of {}ms is too long; the maximum is {}ms.",
                    self.debounce_ms, MAX_DEBOUNCE_MS
                ),
            ));
        }

        if self.state_file.trim().is_empty() {
            return Err(ConfigError::validation(
                "dashboard.state_file",
                "State file path must not be empty.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.dashboard.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
