//! Main TUI application state machine.
//!
//! Handles:
//! - Disease selection from the sidebar
//! - Form input event handling
//! - Synchronous prediction on explicit submit

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::{ModelRegistry, PredictionDispatcher, Session};

use super::ui::{form::render_form, menu::render_menu, render_disclaimer, result::render_result_panel};

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Active disease, its form and the last outcome
    session: Session,

    /// Scores submissions against the shared registry
    dispatcher: PredictionDispatcher,

    /// Whether the registry was loaded from a verified manifest
    models_verified: bool,
}

impl App {
    /// Create the application around an already-loaded registry.
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        let models_verified = registry.is_verified();
        Self {
            should_quit: false,
            session: Session::new(),
            dispatcher: PredictionDispatcher::new(registry),
            models_verified,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(28), Constraint::Min(0)])
                    .split(chunks[0]);

                let main = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(4)])
                    .split(columns[1]);

                render_menu(f, columns[0], self.session.active(), self.models_verified);
                render_form(f, main[0], self.session.form());
                render_result_panel(f, main[1], self.session.outcome());
                render_disclaimer(f, chunks[1]);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::PageDown => self.session.select_next(),
            KeyCode::PageUp => self.session.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.session.focus_next(),
            KeyCode::Up | KeyCode::BackTab => self.session.focus_prev(),
            KeyCode::Right => self.session.form_mut().step(1),
            KeyCode::Left => self.session.form_mut().step(-1),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.form_mut().input_char(c);
            }
            KeyCode::Backspace => self.session.form_mut().delete_char(),
            KeyCode::Delete => self.session.form_mut().clear_field(),
            KeyCode::Enter => {
                self.session.submit(&self.dispatcher);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::tests::fixed_registry;
    use crate::application::Outcome;
    use crate::domain::{Disease, Verdict};

    fn app(class: u8) -> App {
        App::new(Arc::new(fixed_registry(class)))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_then_enter_predicts_active_disease() {
        let mut app = app(1);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.session.active(), Disease::HeartDisease);

        for c in "63".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.session.form().value("age"), Some(63.0));

        press(&mut app, KeyCode::Enter);
        match app.session.outcome() {
            Some(Outcome::Result(result)) => {
                assert_eq!(result.disease, Disease::HeartDisease);
                assert_eq!(result.verdict, Verdict::Positive);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_arrows_step_and_move_focus() {
        let mut app = app(0);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.form().value("Pregnancies"), Some(2.0));
        assert_eq!(app.session.form().value("Glucose"), Some(-1.0));

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.session.form().raw(0), "");
    }

    #[test]
    fn test_verdict_survives_field_navigation() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Up);
        assert!(matches!(app.session.outcome(), Some(Outcome::Result(_))));

        press(&mut app, KeyCode::Char('7'));
        assert!(app.session.outcome().is_none());
    }

    #[test]
    fn test_page_up_wraps_and_resets_form() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.session.active(), Disease::HypoThyroid);
        assert!((0..7).all(|i| app.session.form().raw(i).is_empty()));
    }
}
