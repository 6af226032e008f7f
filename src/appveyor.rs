//! AppVeyor build worker integration.
//!
//! [`AppVeyorLog`] wraps any [`BuildLog`]. While active it also reports
//! fatal/error, warning and information messages to the build's message
//! list, then hands every call to the wrapped log so console output is the
//! same with or without CI.

use std::process::Command;

use serde_json::Value;

use crate::build_log::BuildLog;
use crate::config::APPVEYOR_VARIABLE;
use crate::error::LogError;
use crate::format;
use crate::level::{LogLevel, Verbosity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Information,
    Warning,
    Error,
}

impl MessageCategory {
    /// Category a level is reported under; verbose and debug are not reported
    pub fn for_level(level: LogLevel) -> Option<Self> {
        match level {
            LogLevel::Fatal | LogLevel::Error => Some(MessageCategory::Error),
            LogLevel::Warning => Some(MessageCategory::Warning),
            LogLevel::Information => Some(MessageCategory::Information),
            LogLevel::Verbose | LogLevel::Debug => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageCategory::Information => "Information",
            MessageCategory::Warning => "Warning",
            MessageCategory::Error => "Error",
        }
    }
}

/// Receives messages for a CI provider's build summary
pub trait BuildReporter: Send + Sync {
    fn add_message(&self, category: MessageCategory, message: &str) -> Result<(), LogError>;

    fn add_error_message(&self, message: &str) -> Result<(), LogError> {
        self.add_message(MessageCategory::Error, message)
    }

    fn add_warning_message(&self, message: &str) -> Result<(), LogError> {
        self.add_message(MessageCategory::Warning, message)
    }

    fn add_informational_message(&self, message: &str) -> Result<(), LogError> {
        self.add_message(MessageCategory::Information, message)
    }
}

/// Reports through the `appveyor` command line tool present on build workers
#[derive(Debug, Clone)]
pub struct AppVeyorCli {
    program: String,
}

impl AppVeyorCli {
    pub fn new(program: impl Into<String>) -> Self {
        AppVeyorCli {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments of `appveyor AddMessage`
    pub fn arguments(category: MessageCategory, message: &str) -> Vec<String> {
        vec![
            "AddMessage".to_string(),
            message.to_string(),
            "-Category".to_string(),
            category.as_str().to_string(),
        ]
    }
}

impl Default for AppVeyorCli {
    fn default() -> Self {
        AppVeyorCli::new("appveyor")
    }
}

impl BuildReporter for AppVeyorCli {
    fn add_message(&self, category: MessageCategory, message: &str) -> Result<(), LogError> {
        let status = Command::new(&self.program)
            .args(Self::arguments(category, message))
            .status()
            .map_err(|e| LogError::Reporter(format!("cannot run '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(LogError::Reporter(format!(
                "'{} AddMessage' exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// When forwarding is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Active while the variable holds a non-blank value, checked per call
    Environment(String),
    Always,
    Never,
}

impl Activation {
    pub fn is_active(&self) -> bool {
        match self {
            Activation::Environment(variable) => variable_is_set(variable),
            Activation::Always => true,
            Activation::Never => false,
        }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Environment(APPVEYOR_VARIABLE.to_string())
    }
}

/// True when `variable` is present with a non-blank value
pub fn variable_is_set(variable: &str) -> bool {
    std::env::var(variable).is_ok_and(|value| !value.trim().is_empty())
}

pub struct AppVeyorLog<L, R> {
    inner: L,
    reporter: R,
    activation: Activation,
}

impl<L: BuildLog, R: BuildReporter> AppVeyorLog<L, R> {
    pub fn new(inner: L, reporter: R, activation: Activation) -> Self {
        AppVeyorLog {
            inner,
            reporter,
            activation,
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    fn forward(&self, level: LogLevel, format: &str, args: &[Value]) -> Result<(), LogError> {
        let Some(category) = MessageCategory::for_level(level) else {
            return Ok(());
        };
        let message = format::render(format, args)?;
        match category {
            MessageCategory::Error => self.reporter.add_error_message(&message),
            MessageCategory::Warning => self.reporter.add_warning_message(&message),
            MessageCategory::Information => self.reporter.add_informational_message(&message),
        }
    }
}

impl<L: BuildLog, R: BuildReporter> BuildLog for AppVeyorLog<L, R> {
    fn verbosity(&self) -> Verbosity {
        self.inner.verbosity()
    }

    fn set_verbosity(&self, verbosity: Verbosity) {
        self.inner.set_verbosity(verbosity)
    }

    /// Reporting does not look at the verbosity threshold; only the console
    /// output is filtered by it.
    fn write(
        &self,
        verbosity: Verbosity,
        level: LogLevel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        let forwarded = if self.activation.is_active() {
            self.forward(level, format, args)
        } else {
            Ok(())
        };
        let written = self.inner.write(verbosity, level, format, args);
        written.and(forwarded)
    }
}
