//! Terminal gallery for browsing LEGO set inventories.
//!
//! # Architecture
//!
//! ```text
//! crates/bv-tui/src/
//!   lib.rs            # run() and the event loop
//!   app.rs            # Application state, key handling, load bookkeeping
//!   event.rs          # Event types (Key, Mouse, Paste, Resize, Tick, Render)
//!   tui.rs            # Terminal wrapper with async event streaming
//!   action.rs         # User actions (commands from key bindings)
//!   ui.rs             # Layout and rendering orchestration
//!   theme.rs          # Color scheme, styles and color swatches
//!   error.rs          # TUI-specific error types
//!   components/
//!     header.rs       # SetHeader with the catalog attribution
//!     search_bar.rs   # Color / category / part search boxes
//!     option_picker.rs# Multi-select color and category pickers
//!     gallery.rs      # Part cards table
//!     card_detail.rs  # Variants and image URLs of the selected card
//!     set_picker.rs   # Favourites and manual set id overlay
//!     help.rs         # Key binding overlay
//!     status_bar.rs   # Mode, messages, filter summary, counts
//! ```
//!
//! Each interaction runs to completion before the next event is read. A set
//! load is awaited inside the loop, so input is held until it finishes.
//!
//! # Usage
//!
//! ```no_run
//! use bv_client::CatalogClient;
//! use bv_core::Config;
//!
//! # async fn demo() -> Result<(), bv_tui::TuiError> {
//! let config = Config::default();
//! let client = CatalogClient::from_config(&config.api)?;
//! bv_tui::run(config, client).await
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod app;
pub mod components;
pub mod error;
pub mod event;
pub mod theme;
pub mod tui;
pub mod ui;

use bv_client::{CatalogClient, Transport};
use bv_core::{Config, ReferenceData};
use ratatui::layout::Rect;
use tracing::{debug, info};

pub use action::Action;
pub use app::{App, AppMode, CursorState, Focus, LoadRequest, SetView, StatusMessage};
pub use error::TuiError;
pub use event::Event;
pub use theme::Theme;
pub use tui::Tui;

/// Runs the interactive browser until the user quits.
///
/// 1. Loads the reference tables named in the configuration
/// 2. Enters the terminal
/// 3. Runs the event loop, fetching sets through `client`
/// 4. Restores the terminal
///
/// # Errors
///
/// Returns an error if a reference table cannot be loaded, or if the
/// terminal cannot be initialized or restored. Catalog failures are shown in
/// the interface instead.
pub async fn run<T: Transport>(config: Config, client: CatalogClient<T>) -> Result<(), TuiError> {
    let reference = ReferenceData::load(&config.reference)?;
    let theme = Theme::from_scheme(config.tui.color_scheme);
    let mut tui = Tui::new(&config.tui)?;
    let mut app = App::new(config, reference);

    tui.enter()?;
    app.set_terminal_size(tui.size());

    info!("Entering main event loop");
    let result = run_event_loop(&mut tui, &mut app, &client, &theme).await;

    tui.exit()?;
    result
}

async fn run_event_loop<T: Transport>(
    tui: &mut Tui,
    app: &mut App,
    client: &CatalogClient<T>,
    theme: &Theme,
) -> Result<(), TuiError> {
    let mut dirty = true;
    loop {
        let pending = app.take_pending_load();
        if dirty || pending.is_some() {
            tui.draw(|frame| ui::render(app, frame, theme))?;
            dirty = false;
        }

        if let Some(request) = pending {
            if request.reload {
                client.invalidate(&request.set_num);
            }
            let result = client.load_set(&request.set_num).await;
            app.finish_load(&request, result);
            dirty = true;
            continue;
        }

        let Some(event) = tui.next_event().await else {
            return Err(TuiError::ChannelClosed);
        };

        let action = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Paste(text) => app.handle_paste(&text),
            Event::Resize { width, height } => {
                app.set_terminal_size(Rect::new(0, 0, width, height));
                Action::Render
            }
            Event::Tick => Action::Tick,
            Event::Render => Action::Render,
            Event::FocusGained | Event::FocusLost => Action::None,
        };

        if action.needs_render() {
            if action != Action::Render {
                debug!(?action, "Applying action");
            }
            dirty = true;
        }
        app.update(action);

        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }
    }
}
