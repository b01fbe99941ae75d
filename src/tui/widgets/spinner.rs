//! Loading spinner widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// App branding
const APP_NAME: &str = "pokedex";
const TAGLINE: &str = "Gotta fetch 'em all";

/// What is being loaded, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    List,
    Detail,
}

impl LoadingStage {
    pub fn message(self) -> &'static str {
        match self {
            Self::List => "Loading Pokémon...",
            Self::Detail => "Loading details...",
        }
    }
}

/// Loading spinner widget
pub struct Spinner {
    frame: usize,
    stage: LoadingStage,
    theme: Theme,
    branded: bool,
}

impl Spinner {
    pub fn new(frame: usize, stage: LoadingStage, theme: Theme) -> Self {
        Self {
            frame,
            stage,
            theme,
            branded: true,
        }
    }

    /// Spinner line only, without app name and tagline (for popups)
    pub fn compact(mut self) -> Self {
        self.branded = false;
        self
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }

    fn centered_x(area: Rect, text: &str) -> u16 {
        area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spinner_text = format!("{} {}", self.current_char(), self.stage.message());
        let center_y = area.y + area.height / 2;

        if !self.branded {
            if area.height == 0 || area.width < spinner_text.chars().count() as u16 {
                return;
            }
            let x = Self::centered_x(area, &spinner_text);
            buf.set_string(x, center_y, &spinner_text, Style::default().fg(self.theme.accent()));
            return;
        }

        if area.height < 5 || area.width < 35 {
            return;
        }

        // App name (bold)
        let name_y = center_y.saturating_sub(2);
        buf.set_string(
            Self::centered_x(area, APP_NAME),
            name_y,
            APP_NAME,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        // Tagline (dim)
        let tag_y = name_y + 1;
        buf.set_string(
            Self::centered_x(area, TAGLINE),
            tag_y,
            TAGLINE,
            Style::default().fg(self.theme.muted()),
        );

        // Spinner - 1 blank line after tagline
        buf.set_string(
            Self::centered_x(area, &spinner_text),
            tag_y + 2,
            &spinner_text,
            Style::default().fg(self.theme.accent()),
        );
    }
}
