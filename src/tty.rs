use is_terminal::IsTerminal;
use serde::Deserialize;

/// Whether colors should be written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    #[value(name = "auto", help = "Color when stdout is a terminal")]
    Auto,
    #[value(name = "always", help = "Always write color escapes")]
    Always,
    #[value(name = "never", help = "Never write color escapes")]
    Never,
}

impl ColorChoice {
    pub fn resolve(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => should_use_colors(),
        }
    }
}

/// Colors are used when stdout is a terminal, `NO_COLOR` is unset and the
/// terminal is not `dumb`.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    std::io::stdout().is_terminal()
}
