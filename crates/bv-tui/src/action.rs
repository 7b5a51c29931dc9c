//! User actions for the TUI.
//!
//! Key and mouse events are translated into an [`Action`] by
//! [`App::handle_key`](crate::App::handle_key) and then applied by
//! [`App::update`](crate::App::update).
//!
//! ```text
//! Key/Mouse Event → App::handle_key → Action → App::update → refresh gallery
//! ```

use bv_core::SearchField;

/// User-initiated actions in the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Move the cursor in the focused panel to the next item.
    NextItem,

    /// Move the cursor to the previous item.
    PreviousItem,

    /// Move the cursor to the first item.
    FirstItem,

    /// Move the cursor to the last item.
    LastItem,

    /// Move the cursor down by one page.
    PageDown,

    /// Move the cursor up by one page.
    PageUp,

    // =========================================================================
    // Focus Management
    // =========================================================================
    /// Focus the next panel (gallery → colors → categories).
    NextFocus,

    /// Focus the previous panel.
    PreviousFocus,

    // =========================================================================
    // Searching
    // =========================================================================
    /// Start typing into a search box.
    EnterSearch(SearchField),

    /// Stop typing; the search text stays active.
    ExitSearch,

    /// Move typing to the next search box.
    CycleSearchField,

    /// Append text to the active search box.
    SearchInput(String),

    /// Delete the last character of the active search box.
    SearchBackspace,

    // =========================================================================
    // Filtering
    // =========================================================================
    /// Toggle the option under the cursor in the focused picker.
    ToggleOption,

    /// Raise the minimum quantity by one.
    IncreaseMinQuantity,

    /// Lower the minimum quantity by one.
    DecreaseMinQuantity,

    /// Reset every search box, selection and the minimum quantity.
    ClearFilters,

    // =========================================================================
    // Sets
    // =========================================================================
    /// Open the set picker overlay.
    OpenSetPicker,

    /// Close the set picker without loading.
    CloseSetPicker,

    /// Append text to the manual set id entry.
    SetInput(String),

    /// Delete the last character of the manual set id entry.
    SetInputBackspace,

    /// Load the typed set id, or the highlighted favourite.
    ConfirmSetPicker,

    /// Drop the cached entries of the last requested set and fetch it again.
    Reload,

    // =========================================================================
    // UI State
    // =========================================================================
    /// Toggle the help panel.
    ToggleHelp,

    /// Hide the help panel.
    HideHelp,

    // =========================================================================
    // Application Control
    // =========================================================================
    /// Quit the application.
    Quit,

    /// Render the UI.
    Render,

    /// Tick (periodic update).
    Tick,

    /// No operation.
    #[default]
    None,
}

impl Action {
    /// Returns `true` if this action requires a re-render.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::None | Self::Tick)
    }

    /// Returns `true` if this is a navigation action.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NextItem
                | Self::PreviousItem
                | Self::FirstItem
                | Self::LastItem
                | Self::PageDown
                | Self::PageUp
        )
    }

    /// Returns `true` if this action changes what the gallery shows.
    #[must_use]
    pub const fn modifies_filter(&self) -> bool {
        matches!(
            self,
            Self::SearchInput(_)
                | Self::SearchBackspace
                | Self::ToggleOption
                | Self::IncreaseMinQuantity
                | Self::DecreaseMinQuantity
                | Self::ClearFilters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_needs_render() {
        assert!(Action::NextItem.needs_render());
        assert!(Action::ToggleHelp.needs_render());
        assert!(!Action::None.needs_render());
        assert!(!Action::Tick.needs_render());
    }

    #[test]
    fn test_action_is_navigation() {
        assert!(Action::NextItem.is_navigation());
        assert!(Action::PageDown.is_navigation());
        assert!(!Action::Quit.is_navigation());
        assert!(!Action::ToggleOption.is_navigation());
    }

    #[test]
    fn test_action_modifies_filter() {
        assert!(Action::SearchInput("r".to_owned()).modifies_filter());
        assert!(Action::ClearFilters.modifies_filter());
        assert!(Action::IncreaseMinQuantity.modifies_filter());

        assert!(!Action::EnterSearch(SearchField::Color).modifies_filter());
        assert!(!Action::Reload.modifies_filter());
    }

    #[test]
    fn test_action_default() {
        assert_eq!(Action::default(), Action::None);
    }
}
