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

    /// Turn the first error, if any, into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            }),
            None => Ok(self.warnings),
        }
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

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_scan(config, &mut result);
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_scan(config: &Config, result: &mut ValidationResult) {
        let scan = &config.scan;

        if scan.limit && scan.target == 0 {
            result.add_error(ValidationError::new(
                "scan.target",
                "target must be greater than 0 for a bounded scan",
            ));
        }

        let ratio = scan.stabilization_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            result.add_error(ValidationError::new(
                "scan.stabilization_ratio",
                "stabilization_ratio must be in (0, 1]",
            ));
        } else if ratio < 0.5 {
            result.add_warning(ValidationWarning::new(
                "scan.stabilization_ratio",
                "stabilization_ratio is low (<0.5), scans may stop before reaching the end of the list",
            ));
        }

        if scan.max_iterations == 0 {
            result.add_error(ValidationError::new(
                "scan.max_iterations",
                "max_iterations must be greater than 0",
            ));
        }

        if scan.max_iterations > 10_000 {
            result.add_warning(ValidationWarning::new(
                "scan.max_iterations",
                "max_iterations is very high (>10000), a stalled list will take long to detect",
            ));
        }

        if scan.call_timeout_secs == Some(0) {
            result.add_error(ValidationError::new(
                "scan.call_timeout_secs",
                "call_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
