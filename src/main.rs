use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::process;

use svclog::{setup, BuildLog, ColorChoice, LogConfig, LogLevel, Verbosity};

#[derive(Parser)]
#[command(name = "svclog")]
#[command(about = "Write a templated message through the colored build log")]
#[command(version)]
struct Args {
    /// Message template, e.g. "Build {0} succeeded"
    #[arg(value_name = "TEMPLATE")]
    template: String,

    /// Values for the template placeholders, in order
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Level of the message
    #[arg(short, long, value_enum, default_value = "information")]
    level: LogLevel,

    /// Log threshold (overrides the config file)
    #[arg(short, long, value_enum)]
    verbosity: Option<Verbosity>,

    /// Verbosity of this message (default: the level's own)
    #[arg(long, value_enum)]
    message_verbosity: Option<Verbosity>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// When to use colors (overrides the config file)
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Templates matching this regex are written without colors
    #[arg(long, value_name = "REGEX")]
    bypass: Option<String>,

    /// Parse each ARG as JSON, falling back to a plain string
    #[arg(long)]
    typed: bool,

    /// Do not report to AppVeyor even on a build worker
    #[arg(long)]
    no_ci: bool,
}

impl Args {
    fn build_config(&self) -> Result<LogConfig> {
        let mut config = match &self.config {
            Some(path) => LogConfig::load(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => LogConfig::default(),
        };

        if let Some(verbosity) = self.verbosity {
            config.verbosity = verbosity;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(pattern) = &self.bypass {
            config.bypass_pattern = Some(pattern.clone());
        }
        Ok(config)
    }

    fn values(&self) -> Vec<Value> {
        self.args.iter().map(|arg| to_value(arg, self.typed)).collect()
    }
}

fn to_value(arg: &str, typed: bool) -> Value {
    if typed {
        if let Ok(value) = serde_json::from_str(arg) {
            return value;
        }
    }
    Value::String(arg.to_string())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("svclog: error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.build_config()?;

    let log = if args.no_ci {
        setup::create_console_log(&config)?
    } else {
        setup::create_log(&config)?
    };

    let verbosity = args
        .message_verbosity
        .unwrap_or_else(|| args.level.default_verbosity());

    log.write(verbosity, args.level, &args.template, &args.values())
        .context("Failed to write message")?;
    Ok(())
}
