use std::io::{self, Stderr, Stdout, Write};

use super::{Channel, Console};
use crate::colors::ConsoleColor;
use crate::tty::ColorChoice;

const RESET: &str = "\x1b[0m";

/// Console over two byte streams, coloring with ANSI SGR sequences.
///
/// Color changes are recorded and only emitted on the next non-empty write to
/// a channel. With colors disabled no escape sequence is ever written.
pub struct AnsiConsole<O: Write, E: Write> {
    out: O,
    err: E,
    colors: bool,
    foreground: ConsoleColor,
    background: ConsoleColor,
    // (fg, bg) last emitted per channel; None = terminal defaults
    applied: [Option<(ConsoleColor, ConsoleColor)>; 2],
}

impl AnsiConsole<Stdout, Stderr> {
    pub fn stdio(choice: ColorChoice) -> Self {
        AnsiConsole::new(io::stdout(), io::stderr(), choice.resolve())
    }
}

impl<O: Write, E: Write> AnsiConsole<O, E> {
    pub fn new(out: O, err: E, colors: bool) -> Self {
        AnsiConsole {
            out,
            err,
            colors,
            foreground: ConsoleColor::Default,
            background: ConsoleColor::Default,
            applied: [None, None],
        }
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn stream(&mut self, channel: Channel) -> &mut dyn Write {
        match channel {
            Channel::Standard => &mut self.out,
            Channel::Error => &mut self.err,
        }
    }

    fn wanted(&self) -> Option<(ConsoleColor, ConsoleColor)> {
        if self.foreground == ConsoleColor::Default && self.background == ConsoleColor::Default {
            None
        } else {
            Some((self.foreground, self.background))
        }
    }
}

impl<O: Write, E: Write> Console for AnsiConsole<O, E> {
    fn foreground(&self) -> ConsoleColor {
        self.foreground
    }

    fn set_foreground(&mut self, color: ConsoleColor) {
        self.foreground = color;
    }

    fn background(&self) -> ConsoleColor {
        self.background
    }

    fn set_background(&mut self, color: ConsoleColor) {
        self.background = color;
    }

    fn reset_color(&mut self) -> io::Result<()> {
        self.foreground = ConsoleColor::Default;
        self.background = ConsoleColor::Default;

        let mut result = Ok(());
        for channel in [Channel::Standard, Channel::Error] {
            if self.applied[channel.index()].take().is_some() {
                let written = self.stream(channel).write_all(RESET.as_bytes());
                result = result.and(written);
            }
        }
        result
    }

    fn write(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let mut sequence = None;
        if self.colors {
            let wanted = self.wanted();
            let slot = &mut self.applied[channel.index()];
            if *slot != wanted {
                *slot = wanted;
                sequence = Some(match wanted {
                    Some((fg, bg)) => {
                        format!("\x1b[{};{}m", fg.ansi_foreground(), bg.ansi_background())
                    }
                    None => RESET.to_string(),
                });
            }
        }

        let stream = self.stream(channel);
        if let Some(sequence) = sequence {
            stream.write_all(sequence.as_bytes())?;
        }
        stream.write_all(text.as_bytes())
    }

    fn write_line(&mut self, channel: Channel) -> io::Result<()> {
        let stream = self.stream(channel);
        stream.write_all(b"\n")?;
        stream.flush()
    }
}
