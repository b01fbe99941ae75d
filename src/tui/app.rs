//! Application state and event loop

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::services::queries::parse_pokemon_id;
use crate::services::{PokemonClient, QueryResult};
use crate::types::{Pokemon, PokemonDetail};

use super::search::filter_by_name;
use super::theme::Theme;
use super::widgets::{
    detail_popup::DetailPopup,
    help::HelpPopup,
    pokemon_list::PokemonListView,
    spinner::{LoadingStage, Spinner},
};

/// Open detail popup
struct DetailView {
    id: i64,
    result: QueryResult<Option<PokemonDetail>>,
}

/// Main application
pub struct App {
    client: PokemonClient,
    theme: Theme,
    list: QueryResult<Vec<Pokemon>>,
    search: String,
    search_active: bool,
    selected: usize,
    detail: Option<DetailView>,
    spinner_frame: usize,
    show_help: bool,
    should_quit: bool,
}

impl App {
    /// Create the app; this issues the list query
    pub fn new(client: PokemonClient, theme: Theme) -> Self {
        let list = client.pokemon_list();
        Self {
            client,
            theme,
            list,
            search: String::new(),
            search_active: false,
            selected: 0,
            detail: None,
            spinner_frame: 0,
            show_help: false,
            should_quit: false,
        }
    }

    /// Pull the latest query states from the client
    pub fn refresh(&mut self) {
        self.list = self.client.pokemon_list();
        if let Some(detail) = &mut self.detail {
            detail.result = self.client.pokemon_detail(detail.id);
        }
        self.clamp_selection();
    }

    /// Rows after applying the search term
    fn filtered(&self) -> Vec<&Pokemon> {
        filter_by_name(&self.list.data, &self.search)
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if self.detail.is_some() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q')
            ) {
                self.detail = None;
            }
            return;
        }

        if self.search_active {
            self.handle_search_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.search.is_empty() {
                    self.should_quit = true;
                } else {
                    self.set_search(String::new());
                }
            }
            KeyCode::Char('/') => {
                self.search_active = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.filtered().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                let mut term = self.search.clone();
                term.push(c);
                self.set_search(term);
            }
            KeyCode::Backspace => {
                let mut term = self.search.clone();
                term.pop();
                self.set_search(term);
            }
            KeyCode::Enter => {
                self.search_active = false;
            }
            KeyCode::Esc => {
                self.search_active = false;
                self.set_search(String::new());
            }
            _ => {}
        }
    }

    fn set_search(&mut self, term: String) {
        self.search = term;
        self.selected = 0;
    }

    fn open_selected(&mut self) {
        let Some(raw_id) = self.filtered().get(self.selected).map(|p| p.id.clone()) else {
            return;
        };
        match parse_pokemon_id(&raw_id) {
            Ok(id) => {
                let result = self.client.pokemon_detail(id);
                self.detail = Some(DetailView { id, result });
            }
            Err(err) => tracing::warn!(id = %raw_id, error = %err, "cannot open detail"),
        }
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        self.spinner_frame = Spinner::next_frame(self.spinner_frame);
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.list.loading {
            Spinner::new(self.spinner_frame, LoadingStage::List, self.theme).render(area, buf);
        } else if let Some(err) = &self.list.error {
            let y = area.y + area.height / 2;
            let headline = "Failed to load Pokémon";
            let x = area.x + (area.width.saturating_sub(headline.chars().count() as u16)) / 2;
            buf.set_string(
                x,
                y,
                headline,
                Style::default()
                    .fg(self.theme.error())
                    .add_modifier(Modifier::BOLD),
            );
            let detail = err.to_string();
            let x = area.x + (area.width.saturating_sub(detail.chars().count() as u16)) / 2;
            buf.set_string(x, y + 1, &detail, Style::default().fg(self.theme.muted()));
        } else {
            let rows = self.filtered();
            PokemonListView::new(
                &rows,
                self.selected,
                &self.search,
                self.search_active,
                self.theme,
            )
            .render(area, buf);
        }

        if let Some(detail) = &self.detail {
            let popup_area = DetailPopup::centered_area(area);
            DetailPopup::new(detail.id, &detail.result, self.spinner_frame, self.theme)
                .render(popup_area, buf);
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(client: PokemonClient) -> anyhow::Result<()> {
    // Theme detection must happen before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(client, theme));
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        app.refresh();
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
