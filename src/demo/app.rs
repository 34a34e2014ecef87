//! Demo application state
//!
//! Owns one selection container built from `[demo]` config and reacts to
//! its change callback. The callback only queues the identifier; the app
//! drains the queue after each input event and turns it into a toast.

use super::toast::Toast;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use selectkit::config::{Config, DemoConfig};
use selectkit::logging::{LogBuffer, LogLevel};
use selectkit::{ChoiceId, Component, Handled, SelectError, SelectionContainer, StyleSheet};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// Identifiers reported by `on_choice_change`, oldest first
pub type ChangeQueue = Rc<RefCell<VecDeque<ChoiceId>>>;

/// Widest the container is drawn, in cells
const SELECT_WIDTH: u16 = 40;

/// Build the demo container: one option per configured label, ids "1".."n"
pub fn build_select(
    demo: &DemoConfig,
    changes: ChangeQueue,
) -> Result<SelectionContainer, SelectError> {
    let options = demo
        .options
        .iter()
        .enumerate()
        .map(|(i, label)| ((i + 1).to_string(), label.clone()));

    options
        .fold(SelectionContainer::builder(), |builder, (id, label)| {
            builder.option(id, label)
        })
        .class(demo.class.as_str())
        .on_choice_change(move |id| changes.borrow_mut().push_back(id.clone()))
        .build()
}

/// Plain text of an option's label
pub fn label_of(select: &SelectionContainer, id: &ChoiceId) -> String {
    select
        .item(id.as_str())
        .map(|item| {
            item.content()
                .spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .unwrap_or_else(|| id.to_string())
}

/// Last path segment of a tracing target ("selectkit::select::state" -> "state")
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

pub struct App {
    pub select: SelectionContainer,
    pub sheet: StyleSheet,
    changes: ChangeQueue,
    pub toast: Option<Toast>,
    toast_duration: Duration,
    log_buffer: LogBuffer,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Result<Self, SelectError> {
        let changes = ChangeQueue::default();
        let select = build_select(&config.demo, Rc::clone(&changes))?;

        Ok(Self {
            select,
            sheet: config.style_sheet(),
            changes,
            toast: None,
            toast_duration: Duration::from_secs(config.demo.toast_secs),
            log_buffer,
            should_quit: false,
        })
    }

    /// q, Esc and Ctrl+C quit
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Result<Handled, SelectError> {
        let handled = self.select.handle_mouse(event)?;
        self.drain_changes();
        Ok(handled)
    }

    /// Turn queued change notifications into a toast (latest wins)
    fn drain_changes(&mut self) {
        let changes: Vec<ChoiceId> = self.changes.borrow_mut().drain(..).collect();
        for id in changes {
            let label = label_of(&self.select, &id);
            tracing::info!(choice = %id, label = %label, "Choice changed");
            self.toast = Some(Toast::new(format!("Selected {label}"), self.toast_duration));
        }
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn draw(&self, f: &mut Frame) -> Result<(), SelectError> {
        let area = f.area();
        let [title_area, select_area, status_area, log_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(self.select.height()),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("selectkit", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled("  click an option, q to quit", Style::default().fg(Color::DarkGray)),
            ])),
            title_area,
        );

        let select_area = Rect {
            width: select_area.width.min(SELECT_WIDTH),
            ..select_area
        };
        self.select.draw(select_area, f.buffer_mut(), &self.sheet)?;

        f.render_widget(Paragraph::new(self.status_line()), status_area);
        self.render_logs(f, log_area);

        if let Some(toast) = &self.toast {
            toast.render(f, area, &self.sheet);
        }
        Ok(())
    }

    fn status_line(&self) -> Line<'static> {
        let snapshot = self.select.snapshot();
        let active = match snapshot.active() {
            Some(id) => format!("{} ({})", label_of(&self.select, id), id),
            None => "none".to_string(),
        };
        Line::from(format!(
            "Active: {}  revision {}",
            active,
            snapshot.revision()
        ))
    }

    fn render_logs(&self, f: &mut Frame, area: Rect) {
        let block = Block::bordered().title(" Logs ");
        let rows = block.inner(area).height as usize;

        let lines: Vec<Line> = self
            .log_buffer
            .recent(rows)
            .into_iter()
            .map(|entry| {
                let color = match entry.level {
                    LogLevel::Error => Color::Red,
                    LogLevel::Warn => Color::Yellow,
                    LogLevel::Info => Color::Green,
                    LogLevel::Debug => Color::Blue,
                    LogLevel::Trace => Color::DarkGray,
                };
                Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(format!("{:<5} ", entry.level.as_str()), Style::default().fg(color)),
                    Span::styled(
                        format!("{} ", short_target(&entry.target)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(entry.message),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};
    use selectkit::logging::LogEntry;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &App) {
        let mut result = Ok(());
        terminal.draw(|f| result = app.draw(f)).unwrap();
        result.unwrap();
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_log_strip_shows_target() {
        let buffer = LogBuffer::new();
        buffer.add(LogEntry {
            timestamp: chrono::Utc::now(),
            level: LogLevel::Warn,
            target: "selectkit::select::state".to_string(),
            message: "Choice update ignored".to_string(),
        });
        let app = App::new(&Config::default(), buffer).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        draw(&mut terminal, &app);

        // Log block starts below the status row; first entry on row 8
        let row = row_text(&terminal, 8);
        assert!(row.contains("WARN  state Choice update ignored"));
        assert_eq!(short_target("plain"), "plain");
    }

    #[test]
    fn test_build_select_numbers_options() {
        let select = build_select(&DemoConfig::default(), ChangeQueue::default()).unwrap();
        let ids: Vec<String> = select.choice_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(label_of(&select, &ChoiceId::from("2")), "World");
        assert_eq!(label_of(&select, &ChoiceId::from("9")), "9");
    }

    #[test]
    fn test_click_queues_change_and_shows_toast() {
        let mut app = App::new(&Config::default(), LogBuffer::new()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        draw(&mut terminal, &app);

        // title row, then the container border, then "Hello" on row 2
        assert!(row_text(&terminal, 2).contains("Hello"));

        let handled = app.handle_mouse(click(3, 3)).unwrap();
        assert!(handled.was_handled());
        assert_eq!(app.select.active_choice(), Some(ChoiceId::from("2")));
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Selected World")
        );

        draw(&mut terminal, &app);
        assert!(row_text(&terminal, 3).contains("● World"));
        assert!(row_text(&terminal, 6).contains("Active: World (2)  revision 1"));
    }

    #[test]
    fn test_click_outside_changes_nothing() {
        let mut app = App::new(&Config::default(), LogBuffer::new()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        draw(&mut terminal, &app);

        let handled = app.handle_mouse(click(55, 15)).unwrap();
        assert!(!handled.was_handled());
        assert!(app.select.active_choice().is_none());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_expired_toast_is_dropped_on_tick() {
        let mut config = Config::default();
        config.demo.toast_secs = 0;
        let mut app = App::new(&config, LogBuffer::new()).unwrap();
        app.select.update_active_choice("1");
        app.drain_changes();
        assert!(app.toast.is_some());

        app.tick();
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&Config::default(), LogBuffer::new()).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!app.should_quit);
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_duplicate_labels_still_build() {
        let mut config = Config::default();
        config.demo.options = vec!["Same".to_string(), "Same".to_string()];
        let app = App::new(&config, LogBuffer::new()).unwrap();
        assert_eq!(app.select.choice_ids().len(), 2);
    }
}
