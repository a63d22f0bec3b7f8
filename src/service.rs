use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::commands::Command;
use crate::ui::{EventResult, Keybinding};

pub enum ServiceMsg {
    /// No action needed
    Idle,
    /// Run one or more commands
    Run(Vec<Box<dyn Command>>),
}

impl<T: Command> From<T> for ServiceMsg {
    fn from(value: T) -> Self {
        Self::Run(vec![Box::new(value)])
    }
}

impl ServiceMsg {
    /// Merge two results, keeping every command.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Idle, other) => other,
            (this, Self::Idle) => this,
            (Self::Run(mut a), Self::Run(b)) => {
                a.extend(b);
                Self::Run(a)
            }
        }
    }
}

/// A screen driven by its own message queue.
///
/// The App calls methods in this order:
///
/// 1. `init()` - once at startup
/// 2. `update()` - immediately after init to process startup messages
/// 3. For each event:
///    - `handle_tick()` if tick event
///    - `handle_key()` if key event, then `update()` if consumed
/// 4. When a command completes: `update()`
pub trait Service {
    /// Queue startup message(s).
    fn init(&mut self) {}

    /// Handle a tick event for animations.
    fn handle_tick(&mut self) {}

    /// Handle a key event.
    ///
    /// # Errors
    /// Returns an error if a component failed to handle the key.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>>;

    /// Process all queued messages and return the commands to run.
    ///
    /// # Errors
    /// Returns an error if message processing fails. The App displays it and
    /// keeps running.
    fn update(&mut self) -> Result<ServiceMsg>;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Keybindings for the focused part of the service.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}
