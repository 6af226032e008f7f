use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::level::Verbosity;
use crate::tty::ColorChoice;

/// Environment variable AppVeyor sets on its build workers
pub const APPVEYOR_VARIABLE: &str = "APPVEYOR";

/// Configuration for the console log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub verbosity: Verbosity,
    pub color: ColorChoice,
    /// Regex over raw templates; matching messages are written uncolored
    pub bypass_pattern: Option<String>,
    pub appveyor: AppVeyorConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            bypass_pattern: None,
            appveyor: AppVeyorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppVeyorConfig {
    /// Forwarding is active while this variable holds a non-blank value
    pub activation_variable: String,
    /// Build worker command line tool
    pub program: String,
}

impl Default for AppVeyorConfig {
    fn default() -> Self {
        AppVeyorConfig {
            activation_variable: APPVEYOR_VARIABLE.to_string(),
            program: "appveyor".to_string(),
        }
    }
}

impl LogConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // an empty document means all defaults
        if text.trim().is_empty() {
            return Ok(LogConfig::default());
        }
        let config: LogConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.appveyor.activation_variable.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "appveyor.activation_variable must not be empty".to_string(),
            ));
        }
        if self.appveyor.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "appveyor.program must not be empty".to_string(),
            ));
        }
        if let Some(pattern) = &self.bypass_pattern {
            regex::Regex::new(pattern)
                .map_err(|e| ConfigError::Invalid(format!("bypass_pattern: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert_eq!(config.color, ColorChoice::Auto);
        assert!(config.bypass_pattern.is_none());
        assert_eq!(config.appveyor.activation_variable, "APPVEYOR");
        assert_eq!(config.appveyor.program, "appveyor");
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(LogConfig::from_yaml_str("").unwrap(), LogConfig::default());
        assert_eq!(LogConfig::from_yaml_str("\n  \n").unwrap(), LogConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = LogConfig::from_yaml_str(
            r#"
verbosity: diag
color: never
bypass_pattern: '^##vso\['
appveyor:
  program: /opt/appveyor/appveyor
"#,
        )
        .unwrap();
        assert_eq!(config.verbosity, Verbosity::Diagnostic);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.bypass_pattern.as_deref(), Some(r"^##vso\["));
        assert_eq!(config.appveyor.program, "/opt/appveyor/appveyor");
        assert_eq!(config.appveyor.activation_variable, "APPVEYOR");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            LogConfig::from_yaml_str("verbosity: loud"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LogConfig::from_yaml_str("colour: never"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LogConfig::from_yaml_str("bypass_pattern: '(['"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LogConfig::from_yaml_str("appveyor:\n  program: ''"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
