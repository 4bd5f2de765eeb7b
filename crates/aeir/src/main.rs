use std::time::Duration;

use aeir_background::{HeroBackground, IntervalTicker};
use aeir_core::Config;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tracing::info;

mod chat;
mod logging;
mod portfolio;
mod ui;

use chat::{ChatSession, ChatWorker, GeminiClient};
use portfolio::Filter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();
    let config = aeir_config::load_or_default();
    info!(log = ?log_path, "Starting AEIR flyover");

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration.
    config: Config,
    /// Animated flight grid behind everything else.
    background: Option<HeroBackground>,
    /// Is the services panel shown?
    show_services: bool,
    /// Is the portfolio panel shown?
    show_portfolio: bool,
    /// Category filter for the portfolio.
    portfolio_filter: Filter,
    /// Chat assistant widget.
    chat: ChatSession,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let chat = ChatSession::new(ChatWorker::spawn(GeminiClient::new(&config.chat)));
        Self {
            running: false,
            config,
            background: None,
            show_services: false,
            show_portfolio: false,
            portfolio_filter: Filter::default(),
            chat,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.background = Some(HeroBackground::start(
            size.width,
            size.height,
            &self.config.flight,
        ));
        let frame_period = IntervalTicker::from_hz(self.config.flight.refresh_hz).period();

        self.running = true;
        while self.running {
            self.chat.poll();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_period)?;
        }

        if let Some(mut background) = self.background.take() {
            background.stop();
        }
        info!("AEIR flyover stopped");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(background) = &self.background {
            frame.render_widget(background, area);
        }

        let [main, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        ui::render_hero(frame, main);
        ui::render_footer(frame, footer, self.chat.is_open());

        if self.show_services {
            ui::render_services(frame, main);
        }
        if self.show_portfolio {
            ui::render_portfolio(frame, main, self.portfolio_filter);
        }
        if self.chat.is_open() {
            ui::render_chat(frame, main, &self.chat);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls no longer than one frame so the backdrop keeps moving.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        if self.chat.is_open() {
            match key.code {
                KeyCode::Esc => self.chat.close(),
                KeyCode::Enter => {
                    self.chat.send();
                }
                KeyCode::Backspace => self.chat.backspace(),
                KeyCode::Char(ch) => self.chat.push_char(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('s') => {
                self.show_services = !self.show_services;
                self.show_portfolio = false;
            }
            KeyCode::Char('p') => {
                self.show_portfolio = !self.show_portfolio;
                self.show_services = false;
            }
            KeyCode::Char('f') if self.show_portfolio => {
                self.portfolio_filter = self.portfolio_filter.next();
            }
            KeyCode::Char('a') => self.chat.toggle(),
            _ => {}
        }
    }

    /// Forward a terminal resize to the backdrop.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        if let Some(background) = &self.background {
            background.resize(cols, rows);
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        let mut app = App::new(Config::default());
        app.running = true;
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = self::app();
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_services_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert!(app.show_services);
        press(&mut app, KeyCode::Char('s'));
        assert!(!app.show_services);
    }

    #[test]
    fn test_portfolio_toggle_and_filter() {
        let mut app = app();
        // Filter key does nothing while the portfolio is hidden
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.portfolio_filter, Filter::All);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('p'));
        assert!(app.show_portfolio);
        assert!(!app.show_services);

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.portfolio_filter.label(), "Events");

        press(&mut app, KeyCode::Char('p'));
        assert!(!app.show_portfolio);
    }

    #[test]
    fn test_chat_captures_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(app.chat.is_open());

        // 'q' and 's' are text while the chat is open
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.chat.input(), "qs");
        assert!(app.running);
        assert!(!app.show_services);

        press(&mut app, KeyCode::Esc);
        assert!(!app.chat.is_open());
        assert!(app.running);
    }
}
