//! UI building blocks.
//!
//! - [`Component`] - reusable, interactive pieces that know nothing about products
//! - [`Modal`] - overlays that capture all input until dismissed
//! - [`EventResult`] - outcome of handling a key

pub mod components;

mod error_dialog;
mod spinner;
mod status_bar;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::Theme;

pub use components::{
    ColumnDef, ConfirmDialog, ConfirmEvent, Table, TableEvent, TableRow, TextField,
};
pub use error_dialog::{ErrorDialog, ErrorDialogEvent};
pub use spinner::Spinner;
pub use status_bar::{Keybinding, StatusBar, StatusInfo};

/// Result of handling an input event.
///
/// - `Ignored` - the handler did not recognise the key, the parent should try
/// - `Consumed` - the key was handled and produced nothing
/// - `Event(E)` - the key was handled and produced an output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    Ignored,
    Consumed,
    Event(E),
}

impl<E> EventResult<E> {
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components handle keys and emit generic outputs, e.g. `Table` emits
/// `TableEvent` when a row is activated.
pub trait Component {
    type Output;

    /// Handle a key event.
    ///
    /// # Errors
    /// Returns an error if handling the key failed.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// Ephemeral overlay that blocks the view below.
///
/// Modals capture all input until dismissed, e.g. the delete confirmation.
pub trait Modal {
    type Output;

    /// Handle a key event.
    ///
    /// # Errors
    /// Returns an error if handling the key failed.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>>;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}
