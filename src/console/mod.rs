use std::io;

use crate::colors::ConsoleColor;
use crate::level::LogLevel;

pub mod ansi;
pub mod capture;

pub use ansi::AnsiConsole;
pub use capture::{CaptureConsole, ConsoleEvent};

/// Output channel of a console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Standard,
    Error,
}

impl Channel {
    /// Error-class levels write to the error channel
    pub fn for_level(level: LogLevel) -> Self {
        if level.is_error_class() {
            Channel::Error
        } else {
            Channel::Standard
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Channel::Standard => 0,
            Channel::Error => 1,
        }
    }
}

/// A terminal with color state and two output channels.
///
/// Colors are state: they apply to every following `write` until changed or
/// reset. Picking the channel is up to the caller.
pub trait Console {
    fn foreground(&self) -> ConsoleColor;
    fn set_foreground(&mut self, color: ConsoleColor);
    fn background(&self) -> ConsoleColor;
    fn set_background(&mut self, color: ConsoleColor);

    /// Return both colors to the console's defaults
    fn reset_color(&mut self) -> io::Result<()>;

    fn write(&mut self, channel: Channel, text: &str) -> io::Result<()>;

    /// Terminate the current line on `channel`
    fn write_line(&mut self, channel: Channel) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn foreground(&self) -> ConsoleColor {
        (**self).foreground()
    }

    fn set_foreground(&mut self, color: ConsoleColor) {
        (**self).set_foreground(color)
    }

    fn background(&self) -> ConsoleColor {
        (**self).background()
    }

    fn set_background(&mut self, color: ConsoleColor) {
        (**self).set_background(color)
    }

    fn reset_color(&mut self) -> io::Result<()> {
        (**self).reset_color()
    }

    fn write(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        (**self).write(channel, text)
    }

    fn write_line(&mut self, channel: Channel) -> io::Result<()> {
        (**self).write_line(channel)
    }
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn foreground(&self) -> ConsoleColor {
        (**self).foreground()
    }

    fn set_foreground(&mut self, color: ConsoleColor) {
        (**self).set_foreground(color)
    }

    fn background(&self) -> ConsoleColor {
        (**self).background()
    }

    fn set_background(&mut self, color: ConsoleColor) {
        (**self).set_background(color)
    }

    fn reset_color(&mut self) -> io::Result<()> {
        (**self).reset_color()
    }

    fn write(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        (**self).write(channel, text)
    }

    fn write_line(&mut self, channel: Channel) -> io::Result<()> {
        (**self).write_line(channel)
    }
}
