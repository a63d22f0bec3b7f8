//! Async commands for side effects.
//!
//! Commands represent async operations that run outside the main event loop.
//! The catalog returns commands from `update()`, and the App spawns them with
//! completion tracking for the status bar.

use async_trait::async_trait;
use color_eyre::Result;

/// Async command that performs a side effect.
///
/// Commands report their outcome by sending a message back to the
/// controller's channel. An `Err` is reserved for failures the controller
/// cannot turn into a message (e.g. its channel is gone).
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for status display, e.g. `Deleting product 3`.
    fn name(&self) -> String;

    async fn execute(self: Box<Self>) -> Result<()>;
}
