// src/lib.rs
pub mod appveyor;
pub mod bridge;
pub mod build_log;
pub mod colors;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod level;
pub mod matcher;
pub mod service_log;
pub mod setup;
pub mod tty;

pub use error::*;

pub use appveyor::{Activation, AppVeyorCli, AppVeyorLog, BuildReporter, MessageCategory};
pub use bridge::LogBridge;
pub use build_log::BuildLog;
pub use colors::{ConsoleColor, Palette, PaletteTable};
pub use config::{AppVeyorConfig, LogConfig};
pub use console::{AnsiConsole, CaptureConsole, Channel, Console, ConsoleEvent};
pub use format::{FormatToken, PropertyKey, PropertyToken};
pub use level::{LogLevel, Verbosity};
pub use matcher::MessageMatcher;
pub use service_log::ServiceMessageLog;
pub use tty::ColorChoice;
