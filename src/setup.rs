use crate::appveyor::{self, Activation, AppVeyorCli, AppVeyorLog};
use crate::build_log::BuildLog;
use crate::config::LogConfig;
use crate::console::AnsiConsole;
use crate::error::LogError;
use crate::service_log::ServiceMessageLog;

/// Build the log for this process: a colored console log on stdout/stderr,
/// wrapped for AppVeyor when the activation variable is set.
pub fn create_log(config: &LogConfig) -> Result<Box<dyn BuildLog>, LogError> {
    let console = AnsiConsole::stdio(config.color);
    let log = ServiceMessageLog::from_config(console, config)?;

    if !appveyor::variable_is_set(&config.appveyor.activation_variable) {
        return Ok(Box::new(log));
    }

    Ok(Box::new(AppVeyorLog::new(
        log,
        AppVeyorCli::new(config.appveyor.program.clone()),
        Activation::Environment(config.appveyor.activation_variable.clone()),
    )))
}

/// Same as [`create_log`] without the CI wrapper
pub fn create_console_log(config: &LogConfig) -> Result<Box<dyn BuildLog>, LogError> {
    let console = AnsiConsole::stdio(config.color);
    Ok(Box::new(ServiceMessageLog::from_config(console, config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Verbosity;

    #[test]
    fn test_create_log_applies_config() {
        let mut config = LogConfig {
            verbosity: Verbosity::Minimal,
            ..LogConfig::default()
        };
        config.appveyor.activation_variable = "SVCLOG_TEST_NEVER_SET_42".to_string();

        let log = create_log(&config).unwrap();
        assert_eq!(log.verbosity(), Verbosity::Minimal);
    }

    #[test]
    fn test_bad_pattern_fails() {
        let config = LogConfig {
            bypass_pattern: Some("(".to_string()),
            ..LogConfig::default()
        };
        assert!(matches!(create_console_log(&config), Err(LogError::Pattern(_))));
    }
}
