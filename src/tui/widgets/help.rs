//! Key help overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const POPUP_WIDTH: u16 = 42;
const POPUP_HEIGHT: u16 = 16;

/// Width of the key column, including the left indent
const KEY_COLUMN: usize = 18;

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: [Section; 2] = [
    (
        "List",
        &[
            ("↑↓ / j k", "Move selection"),
            ("/", "Search by name"),
            ("Enter", "Show details"),
        ],
    ),
    (
        "Anywhere",
        &[
            ("Esc", "Close popup / clear"),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn centered_area(area: Rect) -> Rect {
        let width = POPUP_WIDTH.min(area.width);
        let height = POPUP_HEIGHT.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn lines(&self, inner_width: u16) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(self.theme.number())
            .add_modifier(Modifier::BOLD);
        let rule = Style::default().fg(self.theme.muted());

        let mut lines = Vec::new();
        for (title, keys) in SECTIONS {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(title, heading)));
            lines.push(Line::from(Span::styled(
                "─".repeat(inner_width as usize),
                rule,
            )));
            for (key, action) in keys {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<width$}", key, width = KEY_COLUMN - 2),
                        Style::default().fg(self.theme.accent()),
                    ),
                    Span::styled(*action, Style::default().fg(self.theme.text())),
                ]));
            }
        }
        lines
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(concat!(" pokedex v", env!("CARGO_PKG_VERSION"), " "))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines(inner.width)).render(inner, buf);

        // Close hint pinned to the last inner row
        if inner.height > 0 {
            let hint_row = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            Paragraph::new(Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(hint_row, buf);
        }
    }
}
