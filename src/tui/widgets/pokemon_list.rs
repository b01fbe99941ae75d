//! Pokémon list widget - search bar plus scrollable table

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::types::Pokemon;

/// Maximum content width
const MAX_CONTENT_WIDTH: u16 = 100;

/// Column definitions: (label, width)
const COLUMNS: [(&str, u16); 3] = [
    ("#", 8),      // marker (2) + number
    ("Name", 24),  // species name
    ("Types", 30), // type names
];

const SEARCH_PLACEHOLDER: &str = "Search Pokémon...";

fn table_width() -> u16 {
    COLUMNS.iter().map(|(_, w)| w).sum()
}

/// Pokémon list view
pub struct PokemonListView<'a> {
    rows: &'a [&'a Pokemon],
    selected: usize,
    search: &'a str,
    search_active: bool,
    theme: Theme,
}

impl<'a> PokemonListView<'a> {
    pub fn new(
        rows: &'a [&'a Pokemon],
        selected: usize,
        search: &'a str,
        search_active: bool,
        theme: Theme,
    ) -> Self {
        Self {
            rows,
            selected,
            search,
            search_active,
            theme,
        }
    }

    /// First row to draw so that `selected` stays on screen
    pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
        if visible_rows == 0 || selected < visible_rows {
            0
        } else {
            selected + 1 - visible_rows
        }
    }

    /// Message for an empty table
    pub fn empty_message(search: &str) -> &'static str {
        if search.trim().is_empty() {
            "No Pokémon available"
        } else {
            "No matching Pokémon found"
        }
    }
}

impl Widget for PokemonListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // 0: Top padding
            Constraint::Length(1), // 1: Search bar
            Constraint::Length(1), // 2: Separator
            Constraint::Length(1), // 3: Header
            Constraint::Fill(1),   // 4: Rows (fill remaining)
            Constraint::Length(1), // 5: Separator
            Constraint::Length(1), // 6: Keybindings
        ])
        .split(centered_area);

        self.render_search(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_header(chunks[3], buf);

        if self.rows.is_empty() {
            let y = chunks[4].y + chunks[4].height / 2;
            Paragraph::new(Line::from(Span::styled(
                Self::empty_message(self.search),
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(
                Rect {
                    y,
                    height: 1.min(chunks[4].height),
                    ..chunks[4]
                },
                buf,
            );
        } else {
            self.render_rows(chunks[4], buf);
        }

        render_separator(chunks[5], buf, self.theme);
        self.render_keybindings(chunks[6], buf);
    }
}

impl PokemonListView<'_> {
    fn table_area(area: Rect) -> Rect {
        let tw = table_width();
        let offset = area.width.saturating_sub(tw) / 2;
        Rect {
            x: area.x + offset,
            y: area.y,
            width: tw.min(area.width),
            height: area.height,
        }
    }

    fn render_search(&self, area: Rect, buf: &mut Buffer) {
        let prompt_style = if self.search_active {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted())
        };

        let mut spans = vec![Span::styled("/ ", prompt_style)];
        if self.search.is_empty() && !self.search_active {
            spans.push(Span::styled(
                SEARCH_PLACEHOLDER,
                Style::default().fg(self.theme.muted()),
            ));
        } else {
            spans.push(Span::styled(
                self.search.to_string(),
                Style::default().fg(self.theme.text()),
            ));
            if self.search_active {
                spans.push(Span::styled("█", Style::default().fg(self.theme.accent())));
            }
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .render(Self::table_area(area), buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let header_style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);

        let spans: Vec<Span> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (label, width))| {
                let text = if i == 0 {
                    format!("  {:<width$}", label, width = (*width as usize) - 2)
                } else {
                    format!("{:<width$}", label, width = *width as usize)
                };
                Span::styled(text, header_style)
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .render(Self::table_area(area), buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let table = Self::table_area(area);
        let visible = area.height as usize;
        let start = Self::scroll_offset(self.selected, visible);

        for (row, (idx, pokemon)) in self
            .rows
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .enumerate()
        {
            let row_area = Rect {
                y: table.y + row as u16,
                height: 1,
                ..table
            };
            self.render_row(row_area, buf, pokemon, idx == self.selected);
        }
    }

    fn render_row(&self, area: Rect, buf: &mut Buffer, pokemon: &Pokemon, is_selected: bool) {
        let marker = if is_selected { "▸ " } else { "  " };
        let name = truncate_str(&pokemon.display_name(), 22);
        let types = if pokemon.types.is_empty() {
            "—".to_string()
        } else {
            truncate_str(&pokemon.types.join(" / "), 30)
        };

        let emphasis = if is_selected {
            Modifier::BOLD
        } else {
            Modifier::empty()
        };

        let spans = vec![
            Span::styled(
                format!("{}{:<6}", marker, format!("#{:0>3}", pokemon.id)),
                Style::default()
                    .fg(self.theme.number())
                    .add_modifier(emphasis),
            ),
            Span::styled(
                format!("{:<24}", name),
                Style::default()
                    .fg(if is_selected {
                        self.theme.accent()
                    } else {
                        self.theme.text()
                    })
                    .add_modifier(emphasis),
            ),
            Span::styled(
                format!("{:<30}", types),
                Style::default().fg(
                    pokemon
                        .types
                        .first()
                        .map_or(self.theme.kind(), |t| self.theme.type_color(t)),
                ),
            ),
        ];

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .render(area, buf);
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let spans = if self.search_active {
            vec![
                Span::styled("Enter", Style::default().fg(self.theme.accent())),
                Span::styled(": Done", Style::default().fg(self.theme.muted())),
                Span::raw("  "),
                Span::styled("Esc", Style::default().fg(self.theme.accent())),
                Span::styled(": Clear", Style::default().fg(self.theme.muted())),
            ]
        } else {
            vec![
                Span::styled("↑↓", Style::default().fg(self.theme.accent())),
                Span::styled(": Navigate", Style::default().fg(self.theme.muted())),
                Span::raw("  "),
                Span::styled("/", Style::default().fg(self.theme.accent())),
                Span::styled(": Search", Style::default().fg(self.theme.muted())),
                Span::raw("  "),
                Span::styled("Enter", Style::default().fg(self.theme.accent())),
                Span::styled(": Details", Style::default().fg(self.theme.muted())),
                Span::raw("  "),
                Span::styled("?", Style::default().fg(self.theme.accent())),
                Span::styled(": Help", Style::default().fg(self.theme.muted())),
            ]
        };

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Truncate a string to max chars, appending "…" if truncated
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars()
                .take(max_chars.saturating_sub(1))
                .collect::<String>()
        )
    }
}

fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}
