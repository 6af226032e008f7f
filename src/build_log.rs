use std::sync::Arc;

use serde_json::Value;

use crate::error::LogError;
use crate::level::{LogLevel, Verbosity};

/// The log a build tool writes to.
///
/// `write` takes `&self` and must be safe to call from several threads and
/// from decorators wrapping another `BuildLog`. It must not be re-entered on
/// the same thread from inside a console implementation.
pub trait BuildLog: Send + Sync {
    /// Current threshold
    fn verbosity(&self) -> Verbosity;

    fn set_verbosity(&self, verbosity: Verbosity);

    /// Render `format` with `args` at `level`, if `verbosity` is within the
    /// threshold.
    fn write(
        &self,
        verbosity: Verbosity,
        level: LogLevel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError>;

    /// Write at `level` with the level's default verbosity
    fn log(&self, level: LogLevel, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.write(level.default_verbosity(), level, format, args)
    }

    fn fatal(&self, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.log(LogLevel::Fatal, format, args)
    }

    fn error(&self, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.log(LogLevel::Error, format, args)
    }

    fn warning(&self, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.log(LogLevel::Warning, format, args)
    }

    fn information(&self, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.log(LogLevel::Information, format, args)
    }

    fn verbose(&self, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.log(LogLevel::Verbose, format, args)
    }

    fn debug(&self, format: &str, args: &[Value]) -> Result<(), LogError> {
        self.log(LogLevel::Debug, format, args)
    }
}

impl<L: BuildLog + ?Sized> BuildLog for Box<L> {
    fn verbosity(&self) -> Verbosity {
        (**self).verbosity()
    }

    fn set_verbosity(&self, verbosity: Verbosity) {
        (**self).set_verbosity(verbosity)
    }

    fn write(
        &self,
        verbosity: Verbosity,
        level: LogLevel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        (**self).write(verbosity, level, format, args)
    }
}

impl<L: BuildLog + ?Sized> BuildLog for Arc<L> {
    fn verbosity(&self) -> Verbosity {
        (**self).verbosity()
    }

    fn set_verbosity(&self, verbosity: Verbosity) {
        (**self).set_verbosity(verbosity)
    }

    fn write(
        &self,
        verbosity: Verbosity,
        level: LogLevel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        (**self).write(verbosity, level, format, args)
    }
}

impl<L: BuildLog + ?Sized> BuildLog for &L {
    fn verbosity(&self) -> Verbosity {
        (**self).verbosity()
    }

    fn set_verbosity(&self, verbosity: Verbosity) {
        (**self).set_verbosity(verbosity)
    }

    fn write(
        &self,
        verbosity: Verbosity,
        level: LogLevel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        (**self).write(verbosity, level, format, args)
    }
}
