use serde::Deserialize;

/// Severity of a log message. Lower values are more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum LogLevel {
    #[value(name = "fatal")]
    Fatal,
    #[value(name = "error")]
    Error,
    #[value(name = "warning", alias = "warn")]
    Warning,
    #[value(name = "information", alias = "info")]
    Information,
    #[value(name = "verbose")]
    Verbose,
    #[value(name = "debug")]
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Information,
        LogLevel::Verbose,
        LogLevel::Debug,
    ];

    /// Fatal and Error go to the error channel.
    pub fn is_error_class(self) -> bool {
        self <= LogLevel::Error
    }

    /// Verbosity the build tool attaches to each level's convenience call
    pub fn default_verbosity(self) -> Verbosity {
        match self {
            LogLevel::Fatal | LogLevel::Error => Verbosity::Quiet,
            LogLevel::Warning => Verbosity::Minimal,
            LogLevel::Information => Verbosity::Normal,
            LogLevel::Verbose => Verbosity::Verbose,
            LogLevel::Debug => Verbosity::Diagnostic,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Information => "information",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// How chatty the log is. A message is shown when its verbosity is at or
/// below the log's threshold.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    #[value(name = "quiet", alias = "q")]
    #[serde(alias = "q")]
    Quiet,
    #[value(name = "minimal", alias = "m")]
    #[serde(alias = "m")]
    Minimal,
    #[default]
    #[value(name = "normal", alias = "n")]
    #[serde(alias = "n")]
    Normal,
    #[value(name = "verbose", alias = "v")]
    #[serde(alias = "v")]
    Verbose,
    #[value(name = "diagnostic", aliases = ["diag", "d"])]
    #[serde(alias = "diag", alias = "d")]
    Diagnostic,
}

impl Verbosity {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Verbosity::Quiet,
            1 => Verbosity::Minimal,
            2 => Verbosity::Normal,
            3 => Verbosity::Verbose,
            _ => Verbosity::Diagnostic,
        }
    }
}

impl std::str::FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" => Ok(Verbosity::Quiet),
            "minimal" | "m" => Ok(Verbosity::Minimal),
            "normal" | "n" => Ok(Verbosity::Normal),
            "verbose" | "v" => Ok(Verbosity::Verbose),
            "diagnostic" | "diag" | "d" => Ok(Verbosity::Diagnostic),
            _ => Err(format!("Unknown verbosity: {}", s)),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "information" | "info" => Ok(LogLevel::Information),
            "verbose" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}
