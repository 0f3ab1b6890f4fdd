//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_agent(config, &mut result);
        Self::validate_scanner(config, &mut result);
        Self::validate_store(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_agent(config: &Config, result: &mut ValidationResult) {
        let agent = &config.agent;
        if agent.tick_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "agent.tick_interval_ms",
                "tick_interval_ms must be greater than 0",
            ));
        } else if agent.tick_interval_ms < 100 {
            result.add_warning(ValidationWarning::new(
                "agent.tick_interval_ms",
                "tick_interval_ms below 100 will re-scan the page very aggressively",
            ));
        }

        if agent.navigation_settle_ms < agent.click_settle_ms {
            result.add_warning(ValidationWarning::new(
                "agent.navigation_settle_ms",
                "navigation_settle_ms is shorter than click_settle_ms; pages may not load in time",
            ));
        }

        if agent.max_ticks > 10_000 {
            result.add_warning(ValidationWarning::new(
                "agent.max_ticks",
                "max_ticks is very high (>10000), use 0 for unlimited",
            ));
        }
    }

    fn validate_scanner(config: &Config, result: &mut ValidationResult) {
        let scanner = &config.scanner;
        if scanner.min_control_size < 0.0 || scanner.min_clickable_size < 0.0 {
            result.add_error(ValidationError::new(
                "scanner",
                "minimum sizes cannot be negative",
            ));
        }

        if scanner.max_label_len == 0 {
            result.add_error(ValidationError::new(
                "scanner.max_label_len",
                "max_label_len must be greater than 0",
            ));
        }

        if scanner.button_label_len >= scanner.max_label_len {
            result.add_warning(ValidationWarning::new(
                "scanner.button_label_len",
                "button_label_len is not below max_label_len; long button text will be rejected",
            ));
        }

        if scanner.ancestor_depth > 10 {
            result.add_warning(ValidationWarning::new(
                "scanner.ancestor_depth",
                "ancestor_depth above 10 tends to pick up section headings as labels",
            ));
        }
    }

    fn validate_store(config: &Config, result: &mut ValidationResult) {
        if config.store.dir.trim().is_empty() {
            result.add_error(ValidationError::new(
                "store.dir",
                "Store directory cannot be empty",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        // Directives such as "formpilot=debug" are passed through untouched.
        if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }

        if !config.logging.file && config.logging.dir.is_some() {
            result.add_warning(ValidationWarning::new(
                "logging.dir",
                "logging.dir is set but file logging is disabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
