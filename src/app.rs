use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::catalog::Catalog;
use crate::commands::Command;
use crate::config::{self, GlobalAction, KeyResolver};
use crate::service::{Service, ServiceMsg};
use crate::theme;
use crate::tui::{Event, Tui};
use crate::ui::{ErrorDialog, ErrorDialogEvent, EventResult, Modal, StatusBar, StatusInfo};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 8.0;
const STATUS_BAR_HEIGHT: u16 = 5;

/// Unique identifier for a spawned command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(u64);

#[derive(Debug)]
pub enum AppMessage {
    /// A spawned command finished; `Err` carries its failure text.
    CommandCompleted {
        id: CommandId,
        result: std::result::Result<(), String>,
    },
}

struct RunningCommand {
    id: CommandId,
    name: String,
}

enum Incoming {
    Event(Event),
    Message(AppMessage),
}

pub struct App {
    catalog: Catalog,
    resolver: Arc<KeyResolver>,
    theme_name: String,
    theme: Theme,
    status_bar: StatusBar,
    error_dialog: Option<ErrorDialog>,
    running: Vec<RunningCommand>,
    next_command_id: u64,
    should_quit: bool,
    should_suspend: bool,
    app_tx: UnboundedSender<AppMessage>,
    app_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(catalog: Catalog, resolver: Arc<KeyResolver>, theme_name: impl Into<String>) -> Self {
        let theme_name = theme_name.into();
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            resolver,
            theme: theme::theme_from_name(&theme_name),
            theme_name,
            status_bar: StatusBar,
            error_dialog: None,
            running: Vec::new(),
            next_command_id: 0,
            should_quit: false,
            should_suspend: false,
            app_tx,
            app_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        self.catalog.init();
        self.update_catalog();

        loop {
            let incoming = tokio::select! {
                event = tui.next_event() => event.map(Incoming::Event),
                msg = self.app_rx.recv() => msg.map(Incoming::Message),
            };

            match incoming {
                Some(Incoming::Event(event)) => self.handle_event(&mut tui, event)?,
                Some(Incoming::Message(msg)) => self.handle_message(msg),
                None => break,
            }

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.resume()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Exiting lazyshop");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Init => {}
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Error(e) => warn!("Terminal event error: {e}"),
            Event::Tick => self.catalog.handle_tick(),
            Event::Render => self.draw(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.draw(tui)?;
            }
            Event::Key(key) => self.handle_key(key),
        }
        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::CommandCompleted { id, result } => {
                let name = self
                    .running
                    .iter()
                    .position(|c| c.id == id)
                    .map(|pos| self.running.remove(pos).name)
                    .unwrap_or_default();

                match result {
                    Ok(()) => debug!("Command '{name}' completed"),
                    Err(e) => self.show_error(format!("{name} failed: {e}")),
                }
                self.update_catalog();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(dialog) = &mut self.error_dialog {
            match dialog.handle_key(key) {
                Ok(EventResult::Event(ErrorDialogEvent::Dismissed)) => self.error_dialog = None,
                Ok(_) => {}
                Err(e) => error!("Error dialog failed to handle key: {e}"),
            }
            return;
        }

        match self.catalog.handle_key(key) {
            Ok(result) if result.is_consumed() => {
                self.update_catalog();
                return;
            }
            Ok(_) => {}
            Err(e) => {
                self.show_error(format!("Failed to handle key: {e}"));
                return;
            }
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if self.resolver.matches_global(&key, GlobalAction::Theme) {
            self.cycle_theme();
        }
    }

    fn cycle_theme(&mut self) {
        let name = theme::next_theme_name(&self.theme_name);
        info!("Switching theme to {name}");
        self.theme = theme::theme_from_name(name);
        self.theme_name = name.to_string();
        if let Err(e) = config::save_theme(name) {
            warn!("Failed to save theme: {e}");
        }
    }

    /// Drain the catalog's queue and spawn whatever it asks for.
    fn update_catalog(&mut self) {
        match self.catalog.update() {
            Ok(ServiceMsg::Idle) => {}
            Ok(ServiceMsg::Run(commands)) => {
                for command in commands {
                    self.spawn(command);
                }
            }
            Err(e) => self.show_error(format!("Catalog update failed: {e}")),
        }
    }

    fn spawn(&mut self, command: Box<dyn Command>) {
        let id = CommandId(self.next_command_id);
        self.next_command_id += 1;

        let name = command.name();
        debug!("Spawning command '{name}'");
        self.running.push(RunningCommand { id, name });

        let app_tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = command.execute().await.map_err(|e| e.to_string());
            let _ = app_tx.send(AppMessage::CommandCompleted { id, result });
        });
    }

    fn show_error(&mut self, message: String) {
        error!("{message}");
        self.error_dialog = Some(ErrorDialog::new(message, Arc::clone(&self.resolver)));
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [main, bar] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                .areas(area);

        self.catalog.render(frame, main, &self.theme);

        let info = StatusInfo {
            base_url: self.catalog.base_url().to_string(),
            product_count: self.catalog.products().len(),
            running: self.running.iter().map(|c| c.name.clone()).collect(),
        };
        self.status_bar
            .render(frame, bar, &self.theme, &info, &self.catalog.keybindings());

        if let Some(dialog) = &mut self.error_dialog {
            dialog.render(frame, area, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::catalog::{HttpProductApi, ProductApi};

    struct FailingCmd;

    #[async_trait]
    impl Command for FailingCmd {
        fn name(&self) -> String {
            "Exploding".to_string()
        }

        async fn execute(self: Box<Self>) -> Result<()> {
            Err(color_eyre::eyre::eyre!("channel closed"))
        }
    }

    fn app() -> App {
        let resolver = Arc::new(KeyResolver::default());
        let api: Arc<dyn ProductApi> = Arc::new(HttpProductApi::new("http://127.0.0.1:9"));
        let catalog = Catalog::new(api, "http://127.0.0.1:9", Arc::clone(&resolver));
        App::new(catalog, resolver, "Catppuccin Mocha")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_failed_command_is_untracked_and_reported() {
        let mut app = app();
        app.spawn(Box::new(FailingCmd));
        assert_eq!(app.running.len(), 1);
        assert!(screen(&mut app).contains("Exploding"));

        let msg = app.app_rx.recv().await.unwrap();
        app.handle_message(msg);

        assert!(app.running.is_empty());
        assert!(app.error_dialog.is_some());
        assert!(screen(&mut app).contains("Exploding failed: channel closed"));

        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_dialog.is_none());
    }

    #[tokio::test]
    async fn test_quit_only_when_catalog_ignores_key() {
        let mut app = app();

        // Typing into the form swallows the quit key
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.catalog.form_state().name, "q");

        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_status_bar_shows_backend_and_hints() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("http://127.0.0.1:9"));
        assert!(text.contains("Refresh"));
        assert!(text.contains("idle"));
    }
}
