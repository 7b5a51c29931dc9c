//! UI components for the TUI.
//!
//! # Component Types
//!
//! - **Widgets** (`Widget` trait): `SetHeader`, `SearchBar`, `CardDetail`, `StatusBar`
//! - **Stateful Widgets** (`StatefulWidget` trait): `OptionPicker`, `Gallery`
//! - **Overlays**: `SetPicker`, `HelpPanel`

mod card_detail;
mod gallery;
mod header;
mod help;
mod option_picker;
mod search_bar;
mod set_picker;
mod status_bar;

pub use card_detail::CardDetail;
pub use gallery::Gallery;
pub use header::SetHeader;
pub use help::HelpPanel;
pub use option_picker::OptionPicker;
pub use search_bar::SearchBar;
pub use set_picker::SetPicker;
pub use status_bar::StatusBar;
