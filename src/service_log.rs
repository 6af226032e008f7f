use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::build_log::BuildLog;
use crate::colors::{Palette, PaletteTable};
use crate::config::LogConfig;
use crate::console::{Channel, Console};
use crate::error::LogError;
use crate::format;
use crate::level::{LogLevel, Verbosity};
use crate::matcher::MessageMatcher;

/// Console log with a palette per level and a bypass for service messages.
///
/// Messages whose raw template satisfies the matcher are written as plain
/// text so CI log scanners see them unchanged; everything else is colored
/// token by token. Fatal and error messages go to the error channel.
pub struct ServiceMessageLog<C> {
    console: Mutex<C>,
    palettes: PaletteTable,
    matcher: MessageMatcher,
    verbosity: AtomicU8,
}

impl<C: Console> ServiceMessageLog<C> {
    /// The console's background at this point becomes the ambient background
    /// of the non-alert palettes.
    pub fn new(console: C, matcher: impl Into<MessageMatcher>, verbosity: Verbosity) -> Self {
        let palettes = PaletteTable::new(console.background());
        ServiceMessageLog {
            console: Mutex::new(console),
            palettes,
            matcher: matcher.into(),
            verbosity: AtomicU8::new(verbosity as u8),
        }
    }

    pub fn with_pattern(console: C, pattern: &str, verbosity: Verbosity) -> Result<Self, LogError> {
        Ok(Self::new(console, MessageMatcher::from_pattern(pattern)?, verbosity))
    }

    /// Threshold and bypass pattern from config; no pattern means no bypass.
    pub fn from_config(console: C, config: &LogConfig) -> Result<Self, LogError> {
        let matcher = match &config.bypass_pattern {
            Some(pattern) => MessageMatcher::from_pattern(pattern)?,
            None => MessageMatcher::never(),
        };
        Ok(Self::new(console, matcher, config.verbosity))
    }

    pub fn palettes(&self) -> &PaletteTable {
        &self.palettes
    }

    pub fn matcher(&self) -> &MessageMatcher {
        &self.matcher
    }

    pub fn into_console(self) -> C {
        self.console.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_plain(
        console: &mut C,
        channel: Channel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        for token in format::parse(format) {
            let token = token?;
            console.write(channel, &token.render(args)?)?;
        }
        Ok(())
    }

    fn write_colored(
        console: &mut C,
        channel: Channel,
        palette: &Palette,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        for token in format::parse(format) {
            let token = token?;
            let (background, foreground) = palette.colors_for(token.is_property());
            console.set_background(background);
            console.set_foreground(foreground);
            console.write(channel, &token.render(args)?)?;
        }
        Ok(())
    }

    /// Terminate the message and restore the console.
    ///
    /// The standard channel always gets a terminator, then colors are reset,
    /// then the message's own channel gets one more. Every step runs even if
    /// an earlier one failed.
    fn finish(console: &mut C, channel: Channel) -> Result<(), LogError> {
        let first = console.write_line(Channel::Standard);
        let reset = console.reset_color();
        let last = console.write_line(channel);
        first.and(reset).and(last).map_err(LogError::from)
    }
}

impl<C: Console + Send> BuildLog for ServiceMessageLog<C> {
    fn verbosity(&self) -> Verbosity {
        Verbosity::from_u8(self.verbosity.load(Ordering::Relaxed))
    }

    fn set_verbosity(&self, verbosity: Verbosity) {
        self.verbosity.store(verbosity as u8, Ordering::Relaxed);
    }

    fn write(
        &self,
        verbosity: Verbosity,
        level: LogLevel,
        format: &str,
        args: &[Value],
    ) -> Result<(), LogError> {
        if verbosity > self.verbosity() {
            return Ok(());
        }

        // finish() restores the console, so a poisoned lock is still usable
        let mut console = self.console.lock().unwrap_or_else(PoisonError::into_inner);
        let channel = Channel::for_level(level);

        let rendered = if self.matcher.matches(format) {
            Self::write_plain(&mut console, channel, format, args)
        } else {
            Self::write_colored(&mut console, channel, self.palettes.get(level), format, args)
        };
        let finished = Self::finish(&mut console, channel);

        rendered.and(finished)
    }
}
