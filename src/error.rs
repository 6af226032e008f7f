#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Format error at position {position}: {message}")]
    Format { position: usize, message: String },

    #[error("Argument missing for placeholder '{key}' at position {position}: {supplied} argument(s) supplied")]
    ArgumentMissing {
        position: usize,
        key: String,
        supplied: usize,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid bypass pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Build reporter failed: {0}")]
    Reporter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    pub(crate) fn format(position: usize, message: impl Into<String>) -> Self {
        LogError::Format {
            position,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for LogError {
    fn from(err: ConfigError) -> Self {
        LogError::Configuration(err.to_string())
    }
}
