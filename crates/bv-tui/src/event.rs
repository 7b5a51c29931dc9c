//! Event types for the TUI event loop.
//!
//! Events come from the terminal (keys, mouse, resize, paste) and from the
//! two timers in [`Tui`](crate::Tui) (tick and render).

use crossterm::event::{KeyEvent, MouseEvent};

/// Events that can be processed by the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    /// A key press event from the terminal.
    Key(KeyEvent),

    /// A mouse event from the terminal.
    Mouse(MouseEvent),

    /// Text pasted into the terminal.
    Paste(String),

    /// Terminal window was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Periodic tick used to expire status messages.
    ///
    /// The tick rate is configured via `TuiConfig::tick_rate_ms`.
    Tick,

    /// Signal to render a new frame.
    Render,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,
}
