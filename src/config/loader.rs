//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{MoneyConfig, OvertimePolicy, PayrollConfig, ReportConfig};

/// Path label used in errors for configuration parsed from a string.
const INLINE_SOURCE: &str = "<inline>";

/// Loads and provides access to payroll configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Overtime after {} hours", loader.overtime().threshold_hours);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, "Loaded payroll configuration");
        Ok(loader)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("money:\n  scale: 3\n")?;
    /// assert_eq!(loader.money().scale, 3);
    /// assert_eq!(loader.reports().kpi_top_n, 5);
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, INLINE_SOURCE)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        // serde_yaml rejects an empty document instead of defaulting it
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the overtime policy.
    pub fn overtime(&self) -> &OvertimePolicy {
        &self.config.overtime
    }

    /// Returns the monetary rounding settings.
    pub fn money(&self) -> &MoneyConfig {
        &self.config.money
    }

    /// Returns the report delivery settings.
    pub fn reports(&self) -> &ReportConfig {
        &self.config.reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OvertimePeriod;
    use chrono::Weekday;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/payroll.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.overtime().period, OvertimePeriod::Weekly);
        assert_eq!(loader.overtime().threshold_hours, dec("40"));
        assert_eq!(loader.overtime().week_starts_on, Weekday::Mon);
        assert_eq!(loader.money().scale, 2);
        assert_eq!(loader.reports().manager_email, "manager@example.com");
        assert_eq!(loader.reports().kpi_top_n, 5);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/payroll.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let loader = ConfigLoader::from_yaml_str("").unwrap();
        assert_eq!(loader.config(), &PayrollConfig::default());
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("overtime: [unclosed");

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert_eq!(path, "<inline>");
            }
            _ => panic!("Expected ConfigParseError"),
        }
    }

    #[test]
    fn test_unknown_period_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("overtime:\n  period: monthly\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_negative_threshold_returns_invalid_config() {
        let result = ConfigLoader::from_yaml_str("overtime:\n  threshold_hours: \"-1\"\n");
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = PayrollConfig::default();
        config.money.scale = 28;
        assert!(ConfigLoader::from_config(config).is_err());
    }
}
