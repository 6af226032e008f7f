use crate::level::LogLevel;

/// The classic 16 console colors, plus the terminal's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleColor {
    #[default]
    Default,
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl ConsoleColor {
    /// SGR parameter selecting this color as foreground
    pub fn ansi_foreground(self) -> u8 {
        match self {
            ConsoleColor::Default => 39,
            ConsoleColor::Black => 30,
            ConsoleColor::DarkRed => 31,
            ConsoleColor::DarkGreen => 32,
            ConsoleColor::DarkYellow => 33,
            ConsoleColor::DarkBlue => 34,
            ConsoleColor::DarkMagenta => 35,
            ConsoleColor::DarkCyan => 36,
            ConsoleColor::Gray => 37,
            ConsoleColor::DarkGray => 90,
            ConsoleColor::Red => 91,
            ConsoleColor::Green => 92,
            ConsoleColor::Yellow => 93,
            ConsoleColor::Blue => 94,
            ConsoleColor::Magenta => 95,
            ConsoleColor::Cyan => 96,
            ConsoleColor::White => 97,
        }
    }

    /// SGR parameter selecting this color as background
    pub fn ansi_background(self) -> u8 {
        self.ansi_foreground() + 10
    }
}

/// Colors for one level: plain text and substituted property values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: ConsoleColor,
    pub foreground: ConsoleColor,
    pub argument_background: ConsoleColor,
    pub argument_foreground: ConsoleColor,
}

impl Palette {
    pub const fn new(
        background: ConsoleColor,
        foreground: ConsoleColor,
        argument_background: ConsoleColor,
        argument_foreground: ConsoleColor,
    ) -> Self {
        Palette {
            background,
            foreground,
            argument_background,
            argument_foreground,
        }
    }

    /// (background, foreground) for a literal or a property token
    pub fn colors_for(&self, is_property: bool) -> (ConsoleColor, ConsoleColor) {
        if is_property {
            (self.argument_background, self.argument_foreground)
        } else {
            (self.background, self.foreground)
        }
    }
}

/// Palette per level, frozen at construction.
///
/// Alert levels (fatal, error) get a solid background for all text. The other
/// levels keep the console's ambient background for literal text; Information
/// highlights substituted values with a dark blue block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    palettes: [Palette; 6],
}

impl PaletteTable {
    pub fn new(ambient: ConsoleColor) -> Self {
        use ConsoleColor::*;

        PaletteTable {
            palettes: [
                Palette::new(Magenta, White, DarkMagenta, White), // fatal
                Palette::new(DarkRed, White, Red, White),          // error
                Palette::new(ambient, Yellow, ambient, Yellow),    // warning
                Palette::new(ambient, White, DarkBlue, White),     // information
                Palette::new(ambient, Gray, ambient, White),       // verbose
                Palette::new(ambient, DarkGray, ambient, Gray),    // debug
            ],
        }
    }

    pub fn get(&self, level: LogLevel) -> &Palette {
        &self.palettes[level.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_a_palette() {
        let table = PaletteTable::new(ConsoleColor::Black);
        for level in LogLevel::ALL {
            let _ = table.get(level);
        }
    }

    #[test]
    fn test_alert_levels_use_solid_backgrounds() {
        let table = PaletteTable::new(ConsoleColor::Black);
        let fatal = table.get(LogLevel::Fatal);
        assert_eq!(fatal.background, ConsoleColor::Magenta);
        assert_eq!(fatal.argument_background, ConsoleColor::DarkMagenta);

        let error = table.get(LogLevel::Error);
        assert_eq!(error.colors_for(false), (ConsoleColor::DarkRed, ConsoleColor::White));
        assert_eq!(error.colors_for(true), (ConsoleColor::Red, ConsoleColor::White));
    }

    #[test]
    fn test_other_levels_keep_ambient_background() {
        let table = PaletteTable::new(ConsoleColor::DarkCyan);
        for level in [LogLevel::Warning, LogLevel::Information, LogLevel::Verbose, LogLevel::Debug] {
            assert_eq!(table.get(level).background, ConsoleColor::DarkCyan);
        }
        assert_eq!(
            table.get(LogLevel::Information).argument_background,
            ConsoleColor::DarkBlue
        );
        assert_eq!(table.get(LogLevel::Debug).foreground, ConsoleColor::DarkGray);
    }

    #[test]
    fn test_ansi_codes() {
        assert_eq!(ConsoleColor::Default.ansi_background(), 49);
        assert_eq!(ConsoleColor::DarkRed.ansi_foreground(), 31);
        assert_eq!(ConsoleColor::White.ansi_background(), 107);
    }
}
