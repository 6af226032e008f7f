use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Channel, Console};
use crate::colors::ConsoleColor;

/// One operation seen by a [`CaptureConsole`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Write {
        channel: Channel,
        text: String,
        foreground: ConsoleColor,
        background: ConsoleColor,
    },
    Line(Channel),
    Reset,
}

#[derive(Debug)]
struct CaptureState {
    events: Vec<ConsoleEvent>,
    foreground: ConsoleColor,
    background: ConsoleColor,
    default_foreground: ConsoleColor,
    default_background: ConsoleColor,
    color_changes: usize,
}

/// In-memory console recording everything written to it.
///
/// Clones share the same record, so a clone can be handed to a log while the
/// original is kept for inspection.
#[derive(Debug, Clone)]
pub struct CaptureConsole {
    state: Arc<Mutex<CaptureState>>,
}

impl Default for CaptureConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self::with_defaults(ConsoleColor::Default, ConsoleColor::Default)
    }

    /// A console whose reset state is the given pair of colors
    pub fn with_defaults(foreground: ConsoleColor, background: ConsoleColor) -> Self {
        CaptureConsole {
            state: Arc::new(Mutex::new(CaptureState {
                events: Vec::new(),
                foreground,
                background,
                default_foreground: foreground,
                default_background: background,
                color_changes: 0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, CaptureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.state().events.clone()
    }

    /// Everything written to `channel`, terminators as `\n`
    pub fn text(&self, channel: Channel) -> String {
        let mut text = String::new();
        for event in &self.state().events {
            match event {
                ConsoleEvent::Write {
                    channel: c, text: t, ..
                } if *c == channel => text.push_str(t),
                ConsoleEvent::Line(c) if *c == channel => text.push('\n'),
                _ => {}
            }
        }
        text
    }

    /// Number of terminators written to `channel`
    pub fn lines(&self, channel: Channel) -> usize {
        self.state()
            .events
            .iter()
            .filter(|e| matches!(e, ConsoleEvent::Line(c) if *c == channel))
            .count()
    }

    /// Text writes to `channel` with the colors active at the time
    pub fn writes(&self, channel: Channel) -> Vec<(String, ConsoleColor, ConsoleColor)> {
        self.state()
            .events
            .iter()
            .filter_map(|e| match e {
                ConsoleEvent::Write {
                    channel: c,
                    text,
                    foreground,
                    background,
                } if *c == channel => Some((text.clone(), *foreground, *background)),
                _ => None,
            })
            .collect()
    }

    /// How many times a color was set
    pub fn color_changes(&self) -> usize {
        self.state().color_changes
    }

    pub fn is_reset(&self) -> bool {
        let state = self.state();
        state.foreground == state.default_foreground && state.background == state.default_background
    }

    pub fn clear(&self) {
        let mut state = self.state();
        state.events.clear();
        state.color_changes = 0;
    }
}

impl Console for CaptureConsole {
    fn foreground(&self) -> ConsoleColor {
        self.state().foreground
    }

    fn set_foreground(&mut self, color: ConsoleColor) {
        let mut state = self.state();
        state.foreground = color;
        state.color_changes += 1;
    }

    fn background(&self) -> ConsoleColor {
        self.state().background
    }

    fn set_background(&mut self, color: ConsoleColor) {
        let mut state = self.state();
        state.background = color;
        state.color_changes += 1;
    }

    fn reset_color(&mut self) -> io::Result<()> {
        let mut state = self.state();
        state.foreground = state.default_foreground;
        state.background = state.default_background;
        state.events.push(ConsoleEvent::Reset);
        Ok(())
    }

    fn write(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        let mut state = self.state();
        let event = ConsoleEvent::Write {
            channel,
            text: text.to_string(),
            foreground: state.foreground,
            background: state.background,
        };
        state.events.push(event);
        Ok(())
    }

    fn write_line(&mut self, channel: Channel) -> io::Result<()> {
        self.state().events.push(ConsoleEvent::Line(channel));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_record() {
        let inspect = CaptureConsole::with_defaults(ConsoleColor::Gray, ConsoleColor::Black);
        let mut handle = inspect.clone();

        handle.set_foreground(ConsoleColor::Red);
        handle.write(Channel::Error, "bad").unwrap();
        handle.write_line(Channel::Error).unwrap();
        assert!(!inspect.is_reset());

        handle.reset_color().unwrap();
        assert!(inspect.is_reset());
        assert_eq!(inspect.foreground(), ConsoleColor::Gray);
        assert_eq!(inspect.text(Channel::Error), "bad\n");
        assert_eq!(inspect.lines(Channel::Error), 1);
        assert_eq!(inspect.lines(Channel::Standard), 0);
        assert_eq!(
            inspect.writes(Channel::Error),
            vec![("bad".to_string(), ConsoleColor::Red, ConsoleColor::Black)]
        );
        assert_eq!(inspect.color_changes(), 1);
    }
}
