//! Application state and main render loop

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use appraise_client::PredictionClient;

use crate::form::Form;
use crate::mode::Mode;

/// Main application state
pub struct App {
    /// Current mode (NORMAL, EDITING)
    pub mode: Mode,
    /// The input form
    pub form: Form,
    /// Last successful prediction
    pub predicted_price: Option<f64>,
    /// Status / error message
    pub status_message: Option<String>,
    /// Saved buffer for cancelling an edit
    edit_backup: Option<String>,
    /// API client
    client: PredictionClient,
    /// Runtime the sync loop blocks on for HTTP calls
    runtime: tokio::runtime::Runtime,
}

impl App {
    /// Create an application talking to the service at `base_url`.
    ///
    /// Probes the service's welcome route once so an unreachable server is
    /// visible in the status line before the first prediction attempt.
    pub fn new(base_url: &str) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let client = PredictionClient::new(base_url);
        let status_message = match runtime.block_on(client.welcome()) {
            Ok(greeting) => Some(greeting),
            Err(e) => Some(format!("Cannot reach prediction service: {e}")),
        };

        Ok(Self {
            mode: Mode::Normal,
            form: Form::new(),
            predicted_price: None,
            status_message,
            edit_backup: None,
            client,
            runtime,
        })
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(code),
            Mode::Editing => {
                self.handle_editing_key(code);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => self.form.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.form.select_prev(),
            KeyCode::Char(' ') => self.form.cycle_selected(),
            KeyCode::Enter | KeyCode::Char('i') => {
                if self.form.selected_field().is_editable() {
                    self.edit_backup = Some(self.form.selected_field().display_value());
                    self.mode = Mode::Editing;
                } else {
                    self.form.cycle_selected();
                }
            }
            KeyCode::Char('p') => self.submit(),
            _ => {}
        }
        false
    }

    fn handle_editing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                self.edit_backup = None;
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => {
                if let Some(backup) = self.edit_backup.take() {
                    self.restore_buffer(backup);
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }
    }

    fn restore_buffer(&mut self, backup: String) {
        while !self.form.selected_field().display_value().is_empty() {
            self.form.pop_char();
        }
        for c in backup.chars() {
            self.form.push_char(c);
        }
    }

    /// Validate the form and request a prediction.
    fn submit(&mut self) {
        let features = match self.form.to_features() {
            Ok(features) => features,
            Err(message) => {
                self.predicted_price = None;
                self.status_message = Some(message);
                return;
            }
        };

        match self.runtime.block_on(self.client.predict(&features)) {
            Ok(price) => {
                self.predicted_price = Some(price);
                self.status_message = None;
            }
            Err(e) => {
                self.predicted_price = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Status bar
                Constraint::Length(10), // Form
                Constraint::Length(3),  // Result
                Constraint::Min(0),     // Message area
                Constraint::Length(1),  // Help line
            ])
            .split(size);

        self.render_status_bar(frame, chunks[0]);
        self.render_form(frame, chunks[1]);
        self.render_result(frame, chunks[2]);
        self.render_message(frame, chunks[3]);
        self.render_help(frame, chunks[4]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode_color = match self.mode {
            Mode::Normal => Color::Blue,
            Mode::Editing => Color::Green,
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" [{}] ", self.mode.short_code()),
                Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Car Price Predictor"),
        ]);

        let bar = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(bar, area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .form
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let selected = i == self.form.selected;
                let style = if selected {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                let cursor = if selected && self.mode == Mode::Editing {
                    "_"
                } else {
                    ""
                };
                ListItem::new(format!(
                    "{:<18} {}{}  ({})",
                    field.label,
                    field.display_value(),
                    cursor,
                    field.hint
                ))
                .style(style)
            })
            .collect();

        let list =
            List::new(items).block(Block::default().title("Car Details").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn render_result(&self, frame: &mut Frame, area: Rect) {
        let text = match self.predicted_price {
            Some(price) => Line::from(Span::styled(
                format!("Estimated price: ${price:.2}"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                "Press p to predict",
                Style::default().fg(Color::DarkGray),
            )),
        };

        let result =
            Paragraph::new(text).block(Block::default().title("Prediction").borders(Borders::ALL));
        frame.render_widget(result, area);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref message) = self.status_message {
            let paragraph =
                Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red));
            frame.render_widget(paragraph, area);
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help = match self.mode {
            Mode::Normal => "up/down move | enter/space edit or cycle | p predict | q quit",
            Mode::Editing => "type digits | enter confirm | esc cancel",
        };
        let paragraph = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
    }
}
