//! Detail popup widget - one Pokémon's extended attributes

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::spinner::{LoadingStage, Spinner};
use crate::services::QueryResult;
use crate::tui::theme::Theme;
use crate::types::PokemonDetail;

/// Width and height of the detail popup
const POPUP_WIDTH: u16 = 68;
const POPUP_HEIGHT: u16 = 16;

const LABEL_WIDTH: usize = 14;

/// Popup title: `"<name> #<id>"`, or `"Pokémon #<id>"` without a name
pub fn detail_title(name: Option<&str>, id: i64) -> String {
    match name {
        Some(name) => format!("{} #{}", name, id),
        None => format!("Pokémon #{}", id),
    }
}

fn or_dash(value: Option<i64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| v.to_string())
}

/// `(label, value)` rows shown for a loaded detail
pub fn detail_rows(detail: &PokemonDetail) -> Vec<(&'static str, String)> {
    let types = if detail.summary.types.is_empty() {
        "Unknown".to_string()
    } else {
        detail.summary.types.join(" • ")
    };
    let stats = if detail.stats.is_empty() {
        "—".to_string()
    } else {
        detail
            .stats
            .iter()
            .map(|s| format!("{}: {}", s.name, s.value))
            .collect::<Vec<_>>()
            .join(" • ")
    };

    let mut rows = vec![
        ("Name", detail.summary.name.clone().unwrap_or_default()),
        ("Types", types),
        ("Height", or_dash(detail.height)),
        ("Weight", or_dash(detail.weight)),
        ("Capture Rate", or_dash(detail.capture_rate)),
        ("Stats", stats),
    ];
    if let Some(sprite) = &detail.summary.sprite {
        rows.push(("Artwork", sprite.clone()));
    }
    rows
}

/// Detail popup overlay
pub struct DetailPopup<'a> {
    id: i64,
    result: &'a QueryResult<Option<PokemonDetail>>,
    spinner_frame: usize,
    theme: Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(
        id: i64,
        result: &'a QueryResult<Option<PokemonDetail>>,
        spinner_frame: usize,
        theme: Theme,
    ) -> Self {
        Self {
            id,
            result,
            spinner_frame,
            theme,
        }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let name = self
            .result
            .data
            .as_ref()
            .and_then(|d| d.summary.name.as_deref());
        let block = Block::default()
            .title(format!(" {} ", detail_title(name, self.id)))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Fill(1),   // [1] Body
            Constraint::Length(1), // [2] Close hint
        ])
        .split(inner);

        // An error takes priority over an empty payload
        if let Some(err) = &self.result.error {
            let lines = vec![
                Line::from(Span::styled(
                    "Failed to load details",
                    Style::default()
                        .fg(self.theme.error())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    err.to_string(),
                    Style::default().fg(self.theme.muted()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        } else {
            match &self.result.data {
                Some(detail) if !self.result.loading => {
                    let lines: Vec<Line> = detail_rows(detail)
                        .into_iter()
                        .map(|(label, value)| {
                            Line::from(vec![
                                Span::styled(
                                    format!("  {:<width$}", label, width = LABEL_WIDTH),
                                    Style::default()
                                        .fg(self.theme.accent())
                                        .add_modifier(Modifier::BOLD),
                                ),
                                Span::styled(value, Style::default().fg(self.theme.text())),
                            ])
                        })
                        .collect();
                    Paragraph::new(lines)
                        .wrap(Wrap { trim: false })
                        .render(chunks[1], buf);
                }
                _ => {
                    Spinner::new(self.spinner_frame, LoadingStage::Detail, self.theme)
                        .compact()
                        .render(chunks[1], buf);
                }
            }
        }

        let hint = Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(self.theme.muted()),
        ));
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PokedexError, Pokemon, PokemonStat};

    fn pikachu() -> PokemonDetail {
        PokemonDetail {
            summary: Pokemon {
                id: "25".to_string(),
                name: Some("Pikachu".to_string()),
                types: vec!["Electric".to_string()],
                sprite: Some("https://img.example/25.png".to_string()),
            },
            capture_rate: Some(190),
            height: Some(4),
            weight: Some(60),
            stats: vec![
                PokemonStat {
                    name: "hp".to_string(),
                    value: 35,
                },
                PokemonStat {
                    name: "speed".to_string(),
                    value: 90,
                },
            ],
        }
    }

    fn render_to_string(popup: DetailPopup<'_>) -> String {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        popup.render(DetailPopup::centered_area(area), &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_detail_title() {
        assert_eq!(detail_title(Some("Pikachu"), 25), "Pikachu #25");
        assert_eq!(detail_title(None, 25), "Pokémon #25");
    }

    #[test]
    fn test_detail_rows_formatting() {
        let rows = detail_rows(&pikachu());
        let get = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("Types"), "Electric");
        assert_eq!(get("Capture Rate"), "190");
        assert_eq!(get("Stats"), "hp: 35 • speed: 90");
        assert_eq!(get("Artwork"), "https://img.example/25.png");
    }

    #[test]
    fn test_detail_rows_fallbacks() {
        let mut detail = pikachu();
        detail.summary.types.clear();
        detail.summary.sprite = None;
        detail.stats.clear();
        detail.capture_rate = None;
        detail.height = None;
        detail.weight = None;

        let rows = detail_rows(&detail);

        assert!(rows.contains(&("Types", "Unknown".to_string())));
        assert!(rows.contains(&("Stats", "—".to_string())));
        assert!(rows.contains(&("Capture Rate", "—".to_string())));
        assert!(rows.contains(&("Height", "—".to_string())));
        assert!(rows.contains(&("Weight", "—".to_string())));
        assert!(!rows.iter().any(|(label, _)| *label == "Artwork"));
    }

    #[test]
    fn test_render_loaded() {
        let result = QueryResult {
            data: Some(pikachu()),
            loading: false,
            error: None,
        };

        let text = render_to_string(DetailPopup::new(25, &result, 0, Theme::Dark));

        assert!(text.contains("Pikachu #25"));
        assert!(text.contains("Capture Rate"));
        assert!(text.contains("190"));
    }

    #[test]
    fn test_render_loading() {
        let result = QueryResult {
            data: None,
            loading: true,
            error: None,
        };

        let text = render_to_string(DetailPopup::new(25, &result, 0, Theme::Dark));

        assert!(text.contains("Pokémon #25"));
        assert!(text.contains("Loading details..."));
    }

    #[test]
    fn test_render_error() {
        let result = QueryResult {
            data: None,
            loading: false,
            error: Some(PokedexError::NotFound(9999)),
        };

        let text = render_to_string(DetailPopup::new(9999, &result, 0, Theme::Dark));

        assert!(text.contains("Failed to load details"));
    }

    #[test]
    fn test_centered_area_small_terminal() {
        let popup_area = DetailPopup::centered_area(Rect::new(0, 0, 30, 10));
        assert_eq!(popup_area.width, 30);
        assert_eq!(popup_area.height, 10);
    }
}
