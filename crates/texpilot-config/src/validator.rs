//! Configuration validation.

use url::Url;

use crate::schema::{Config, LOG_LEVELS};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

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

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_relay(config, &mut result);
        Self::validate_agent(config, &mut result);
        Self::validate_popup(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        if config.relay.host.is_empty() {
            result.add_error(ValidationError::new("relay.host", "Host cannot be empty"));
        }

        if config.relay.model.trim().is_empty() {
            result.add_error(ValidationError::new("relay.model", "Model cannot be empty"));
        }

        Self::validate_http_url("relay.api_url", &config.relay.api_url, result);

        if config.relay.api_key_env.is_empty() {
            result.add_error(ValidationError::new(
                "relay.api_key_env",
                "Credential variable name cannot be empty",
            ));
        }
    }

    fn validate_agent(config: &Config, result: &mut ValidationResult) {
        Self::validate_http_url("agent.relay_url", &config.agent.relay_url, result);

        for (path, selector) in [
            ("agent.editor_selector", &config.agent.editor_selector),
            ("agent.cursor_selector", &config.agent.cursor_selector),
            ("agent.content_selector", &config.agent.content_selector),
        ] {
            if selector.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Selector cannot be empty"));
            }
        }

        if config.agent.editor_wait_ms == 0 {
            result.add_error(ValidationError::new(
                "agent.editor_wait_ms",
                "editor_wait_ms must be greater than 0",
            ));
        }
    }

    fn validate_popup(config: &Config, result: &mut ValidationResult) {
        if config.popup.host_domain.trim().is_empty() {
            result.add_error(ValidationError::new(
                "popup.host_domain",
                "Host domain cannot be empty",
            ));
        }

        if config.popup.status_display_ms == 0 {
            result.add_error(ValidationError::new(
                "popup.status_display_ms",
                "status_display_ms must be greater than 0",
            ));
        }

        if config.popup.settle_delay_ms > 10_000 {
            result.add_warning(ValidationWarning::new(
                "popup.settle_delay_ms",
                "settle_delay_ms is very high (>10s), the popup will appear stuck after injection",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!("Unknown log level '{}', falling back to 'info'", config.logging.level),
            ));
        }
    }

    fn validate_http_url(path: &str, value: &str, result: &mut ValidationResult) {
        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ValidationError::new(
                path,
                format!("Unsupported URL scheme: {}", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e))),
        }
    }
}
