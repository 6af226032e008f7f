use serde_json::Value;

use crate::build_log::BuildLog;
use crate::format;
use crate::level::{LogLevel, Verbosity};

/// Routes `log` crate records into a [`BuildLog`].
///
/// Record text is escaped, so braces in messages are printed as-is rather
/// than read as placeholders.
pub struct LogBridge<L> {
    inner: L,
}

impl<L: BuildLog> LogBridge<L> {
    pub fn new(inner: L) -> Self {
        LogBridge { inner }
    }

    pub fn map_level(level: log::Level) -> (Verbosity, LogLevel) {
        match level {
            log::Level::Error => (Verbosity::Quiet, LogLevel::Error),
            log::Level::Warn => (Verbosity::Minimal, LogLevel::Warning),
            log::Level::Info => (Verbosity::Normal, LogLevel::Information),
            log::Level::Debug => (Verbosity::Verbose, LogLevel::Verbose),
            log::Level::Trace => (Verbosity::Diagnostic, LogLevel::Debug),
        }
    }

    /// Most detailed `log` level that passes the given threshold
    pub fn max_level(verbosity: Verbosity) -> log::LevelFilter {
        match verbosity {
            Verbosity::Quiet => log::LevelFilter::Error,
            Verbosity::Minimal => log::LevelFilter::Warn,
            Verbosity::Normal => log::LevelFilter::Info,
            Verbosity::Verbose => log::LevelFilter::Debug,
            Verbosity::Diagnostic => log::LevelFilter::Trace,
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: BuildLog + 'static> LogBridge<L> {
    /// Make this the global `log` logger.
    ///
    /// The global max level is `Trace`; records are filtered against the
    /// inner log's current threshold.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl<L: BuildLog> log::Log for LogBridge<L> {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= Self::max_level(self.inner.verbosity())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let (verbosity, level) = Self::map_level(record.level());
        let text = record.args().to_string();
        if let Err(e) = self
            .inner
            .write(verbosity, level, &format::escape(&text), &[] as &[Value])
        {
            eprintln!("svclog: cannot write log record: {}", e);
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{CaptureConsole, Channel};
    use crate::matcher::MessageMatcher;
    use crate::service_log::ServiceMessageLog;
    use log::Log;

    fn bridge(capture: &CaptureConsole) -> LogBridge<ServiceMessageLog<CaptureConsole>> {
        LogBridge::new(ServiceMessageLog::new(
            capture.clone(),
            MessageMatcher::never(),
            Verbosity::Normal,
        ))
    }

    #[test]
    fn test_records_are_written_verbatim() {
        let capture = CaptureConsole::new();
        let bridge = bridge(&capture);

        bridge.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .args(format_args!("map {{}} has {} keys", 3))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .level(log::Level::Error)
                .args(format_args!("boom {{0}}"))
                .build(),
        );

        assert_eq!(capture.text(Channel::Standard), "map {} has 3 keys\n\n\n");
        assert_eq!(capture.text(Channel::Error), "boom {0}\n");
    }

    #[test]
    fn test_threshold_applies() {
        let capture = CaptureConsole::new();
        let bridge = bridge(&capture);

        let metadata = log::Metadata::builder().level(log::Level::Debug).build();
        assert!(!bridge.enabled(&metadata));
        bridge.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        assert!(capture.events().is_empty());
    }

    #[test]
    fn test_max_level_mapping() {
        type B = LogBridge<ServiceMessageLog<CaptureConsole>>;
        assert_eq!(B::max_level(Verbosity::Quiet), log::LevelFilter::Error);
        assert_eq!(B::max_level(Verbosity::Normal), log::LevelFilter::Info);
        assert_eq!(B::max_level(Verbosity::Diagnostic), log::LevelFilter::Trace);
    }
}
