//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected row, keybinding keys, search prompt)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, hints, empty states)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Pokédex number color
    pub fn number(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Type badge color
    pub fn kind(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Error indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Color for an elemental type name; unknown types use [`kind`](Self::kind)
    pub fn type_color(self, type_name: &str) -> Color {
        let (dark, light) = match type_name.to_ascii_lowercase().as_str() {
            "fire" => (Color::LightRed, Color::Indexed(160)),
            "water" | "ice" => (Color::LightBlue, Color::Indexed(26)),
            "grass" | "bug" => (Color::LightGreen, Color::Indexed(28)),
            "electric" => (Color::LightYellow, Color::Indexed(136)),
            "psychic" | "fairy" | "ghost" => (Color::LightMagenta, Color::Indexed(127)),
            "poison" | "dragon" => (Color::Magenta, Color::Indexed(91)),
            "ground" | "rock" | "fighting" => (Color::Indexed(179), Color::Indexed(94)),
            _ => return self.kind(),
        };
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}
