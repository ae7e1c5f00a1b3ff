use crate::fetch::{GraphqlClient, Variables};
use crate::models::{PokemonForm, SpeciesRecord};
use crate::utils::{clean_flavor_text, format_name, species_facts, text_to_lines};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io;
use tracing::warn;

/// What the view currently has to show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(Vec<SpeciesRecord>),
    Failed(String),
}

/// Fetches on first use and again only when the query text or variables change.
#[derive(Debug, Default)]
pub struct ViewLoader {
    loaded_for: Option<(String, Variables)>,
}

impl ViewLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_load(&self, query: &str, variables: &Variables) -> bool {
        match &self.loaded_for {
            Some((q, v)) => q != query || v != variables,
            None => true,
        }
    }

    /// Returns `None` when the inputs match the previous load.
    pub async fn load(
        &mut self,
        client: &GraphqlClient,
        query: &str,
        variables: &Variables,
    ) -> Option<ViewState> {
        if !self.needs_load(query, variables) {
            return None;
        }
        self.loaded_for = Some((query.to_string(), variables.clone()));
        let state = match client.fetch(query, variables).await {
            Ok(result) => ViewState::Loaded(result.species),
            Err(err) => {
                warn!(error = %err, "view load failed");
                ViewState::Failed(err.report())
            }
        };
        Some(state)
    }
}

pub struct App {
    pub state: ViewState,
    pub selected: usize,
    pub show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            selected: 0,
            show_help: false,
        }
    }

    /// Replace the view state with the latest load result.
    pub fn apply(&mut self, state: ViewState) {
        self.state = state;
        self.selected = 0;
    }

    pub fn species(&self) -> &[SpeciesRecord] {
        match &self.state {
            ViewState::Loaded(list) => list,
            _ => &[],
        }
    }

    pub fn next(&mut self) {
        let len = self.species().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn previous(&mut self) {
        let len = self.species().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }
}

fn type_color(name: &str) -> (u8, u8, u8) {
    match name.to_lowercase().as_str() {
        "normal" => (168, 168, 120),
        "fire" => (240, 128, 48),
        "water" => (104, 144, 240),
        "grass" => (120, 200, 80),
        "electric" => (248, 208, 48),
        "ice" => (152, 216, 216),
        "fighting" => (192, 48, 40),
        "poison" => (160, 64, 160),
        "ground" => (224, 192, 104),
        "flying" => (168, 144, 240),
        "psychic" => (248, 88, 136),
        "bug" => (168, 184, 32),
        "rock" => (184, 160, 56),
        "ghost" => (112, 88, 152),
        "dragon" => (112, 56, 248),
        "dark" => (112, 88, 72),
        "steel" => (184, 184, 208),
        "fairy" => (238, 153, 172),
        _ => (200, 200, 200),
    }
}

fn stat_abbrev(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SpA".to_string(),
        "special-defense" => "SpD".to_string(),
        "speed" => "SPD".to_string(),
        other => format_name(other),
    }
}

fn type_badges(form: &PokemonForm) -> Spans<'static> {
    let mut spans = vec![Span::raw("Types: ")];
    let names = form.type_names();
    for (i, t) in names.iter().enumerate() {
        let (r, g, b) = type_color(t);
        // pick black or white text for contrast
        let lum = 0.2126 * (r as f32) + 0.7152 * (g as f32) + 0.0722 * (b as f32);
        let fg = if lum > 160.0 { Color::Black } else { Color::White };
        spans.push(Span::styled(
            format!(" {} ", format_name(t)),
            Style::default().fg(fg).bg(Color::Rgb(r, g, b)),
        ));
        if i + 1 < names.len() {
            spans.push(Span::raw(" "));
        }
    }
    Spans::from(spans)
}

fn stat_lines(form: &PokemonForm, inner_w: usize) -> Vec<Spans<'static>> {
    // NAME | VALUE | bar
    let name_w = 10usize;
    let val_w = 4usize;
    let bar_max_w = inner_w.saturating_sub(name_w + val_w + 2);
    let scale_max = 255.0f32;
    form.stats
        .iter()
        .map(|st| {
            let bar_len =
                (((st.base_stat as f32) / scale_max).min(1.0) * (bar_max_w as f32)).round() as usize;
            Spans::from(Span::raw(format!(
                "{:<name_w$} {:>val_w$} {}",
                stat_abbrev(&st.stat.name),
                st.base_stat,
                "█".repeat(bar_len),
                name_w = name_w,
                val_w = val_w
            )))
        })
        .collect()
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_w = r.width.saturating_mul(percent_x) / 100;
    let popup_h = r.height.saturating_mul(percent_y) / 100;
    let popup_x = r.x + (r.width.saturating_sub(popup_w) / 2);
    let popup_y = r.y + (r.height.saturating_sub(popup_h) / 2);
    Rect::new(popup_x, popup_y, popup_w, popup_h)
}

pub fn draw_ui<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> io::Result<()> {
    terminal
        .draw(|f| {
            let size = f.size();
            match &app.state {
                ViewState::Loading => {
                    let para = Paragraph::new("Fetching Pokémon details...")
                        .block(Block::default().borders(Borders::ALL).title("Pokémon"));
                    f.render_widget(para, size);
                }
                ViewState::Failed(message) => {
                    let para = Paragraph::new(vec![
                        Spans::from(Span::styled(
                            "Lookup failed",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )),
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(message.clone())),
                    ])
                    .block(Block::default().borders(Borders::ALL).title("Error"))
                    .wrap(Wrap { trim: true });
                    f.render_widget(para, size);
                }
                ViewState::Loaded(list) if list.is_empty() => {
                    let para = Paragraph::new("No Pokémon matched that name")
                        .block(Block::default().borders(Borders::ALL).title("Pokémon"));
                    f.render_widget(para, size);
                }
                ViewState::Loaded(list) => {
                    let p = &list[app.selected.min(list.len() - 1)];
                    let rows = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(5), Constraint::Min(6)])
                        .split(size);

                    let flavor = p
                        .first_flavor_text()
                        .map(clean_flavor_text)
                        .unwrap_or_else(|| "No Flavor Text".to_string());
                    let mut header = vec![Spans::from(Span::styled(
                        p.name.to_uppercase(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))];
                    let width = rows[0].width.saturating_sub(2).max(1) as usize;
                    for line in text_to_lines(&flavor, width) {
                        header.push(Spans::from(Span::raw(line)));
                    }
                    let header_para = Paragraph::new(header)
                        .block(Block::default().borders(Borders::ALL).title("Pokémon"))
                        .wrap(Wrap { trim: true });
                    f.render_widget(header_para, rows[0]);

                    let cols = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                        .split(rows[1]);

                    let mut info: Vec<Spans> = Vec::new();
                    if let Some(form) = p.form() {
                        info.push(Spans::from(Span::styled(
                            format!("{} (#{})", format_name(&form.name), form.id),
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        info.push(type_badges(form));
                    }
                    for fact in species_facts(p) {
                        info.push(Spans::from(Span::raw(fact)));
                    }
                    let info_para = Paragraph::new(info)
                        .block(Block::default().borders(Borders::ALL).title("Info"))
                        .wrap(Wrap { trim: true });
                    f.render_widget(info_para, cols[0]);

                    let inner_w = cols[1].width.saturating_sub(2) as usize;
                    let stats = p.form().map(|form| stat_lines(form, inner_w)).unwrap_or_default();
                    let stats_para = Paragraph::new(stats)
                        .block(Block::default().borders(Borders::ALL).title("Stats"));
                    f.render_widget(stats_para, cols[1]);
                }
            }

            if app.show_help {
                let popup = centered_rect(60, 40, size);
                let help_lines = vec![
                    Spans::from(Span::styled(
                        "Keybindings",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw("q        Quit")),
                    Spans::from(Span::raw("Up/Down  Switch species")),
                    Spans::from(Span::raw("h / F1   Toggle this help")),
                ];
                let help_para = Paragraph::new(help_lines)
                    .block(Block::default().borders(Borders::ALL).title("Help"))
                    .wrap(Wrap { trim: true });
                f.render_widget(ratatui::widgets::Clear, popup);
                f.render_widget(help_para, popup);
            }
        })
        .map(|_| ())
}
