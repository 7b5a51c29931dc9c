//! Application state and lifecycle management.
//!
//! [`App`] owns everything the interface shows: the loaded set and its part
//! groups, the [`FilterState`], the derived picker options and the projected
//! gallery. It never talks to the network. Loads are queued with
//! [`App::take_pending_load`] and completed by the run loop through
//! [`App::finish_load`].
//!
//! # Architecture
//!
//! ```text
//! App
//!  ├── set: Option<SetView>      # Loaded metadata + part groups
//!  ├── filter: FilterState       # Searches, selections, min quantity
//!  ├── options: FilterOptions    # Colors/categories offered by the pickers
//!  ├── cards: Vec<CardRef>       # Projected gallery
//!  ├── mode: AppMode             # Current UI mode
//!  ├── focus: Focus              # Active panel
//!  ├── gallery/color/category cursors
//!  └── status: Option<StatusMessage>
//! ```

use std::time::Instant;

use bv_client::{ClientError, LoadedSet};
use bv_core::{
    CardRef, CategoryTable, Config, FavouriteSets, FilterOptions, FilterState, GallerySummary,
    PartCard, PartGroup, ReferenceData, SearchField, SetMetadata, gallery, grouping,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::ui;

/// The current mode of the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal browsing mode.
    #[default]
    Normal,

    /// Typing into one of the search boxes.
    Search(SearchField),

    /// Set picker overlay is displayed.
    SetPicker,

    /// Help panel is displayed.
    Help,
}

impl AppMode {
    /// Returns the badge shown in the status bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "BROWSE",
            Self::Search(_) => "SEARCH",
            Self::SetPicker => "SET",
            Self::Help => "HELP",
        }
    }
}

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Results gallery.
    #[default]
    Gallery,

    /// Color picker.
    Colors,

    /// Category picker.
    Categories,
}

impl Focus {
    /// Returns the next panel in Tab order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Gallery => Self::Colors,
            Self::Colors => Self::Categories,
            Self::Categories => Self::Gallery,
        }
    }

    /// Returns the previous panel in Tab order.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Gallery => Self::Categories,
            Self::Colors => Self::Gallery,
            Self::Categories => Self::Colors,
        }
    }
}

/// Cursor and scroll position for a list.
///
/// The list itself lives elsewhere; every movement takes its current length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    /// Currently selected index (if any).
    pub selected: Option<usize>,

    /// Index of the first visible item.
    pub scroll_offset: usize,

    /// Number of items that fit on screen (for page navigation).
    pub visible_height: usize,
}

impl CursorState {
    /// Creates an empty cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves selection to the next item, wrapping to the start.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }

        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) | None => 0,
        });

        self.ensure_visible();
    }

    /// Moves selection to the previous item, wrapping to the end.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }

        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });

        self.ensure_visible();
    }

    /// Moves selection to the first item.
    pub fn select_first(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(0);
        }
        self.scroll_offset = 0;
    }

    /// Moves selection to the last item.
    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(len - 1);
            self.ensure_visible();
        }
    }

    /// Moves selection down by one page.
    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let page_size = self.visible_height.max(1);
        self.selected = Some(match self.selected {
            Some(i) => (i + page_size).min(len - 1),
            None => page_size.min(len - 1),
        });

        self.ensure_visible();
    }

    /// Moves selection up by one page.
    pub fn page_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let page_size = self.visible_height.max(1);
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page_size)));

        self.ensure_visible();
    }

    /// Keeps the cursor inside a list that may have shrunk or grown.
    ///
    /// An empty list clears the selection; a non-empty one always has one.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            self.scroll_offset = 0;
            return;
        }

        self.selected = Some(self.selected.map_or(0, |i| i.min(len - 1)));
        self.scroll_offset = self.scroll_offset.min(len - 1);
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        let height = self.visible_height.max(1);
        if let Some(selected) = self.selected {
            if selected < self.scroll_offset {
                self.scroll_offset = selected;
            } else if selected >= self.scroll_offset + height {
                self.scroll_offset = selected + 1 - height;
            }
        }
    }
}

/// Status message to display in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text.
    pub text: String,

    /// When the message was created.
    pub timestamp: Instant,

    /// Whether this is an error message.
    pub is_error: bool,
}

impl StatusMessage {
    /// Creates a new info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: false,
        }
    }

    /// Creates a new error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: true,
        }
    }

    /// Returns `true` once the message is older than five seconds.
    ///
    /// Error messages stay until replaced.
    #[must_use]
    pub fn should_hide(&self) -> bool {
        !self.is_error && self.timestamp.elapsed().as_secs() > 5
    }
}

/// Set picker overlay state.
#[derive(Debug, Clone, Default)]
pub struct SetPickerState {
    /// Highlighted favourite.
    pub cursor: CursorState,

    /// Manually typed set id; takes precedence over the favourite.
    pub input: String,
}

/// A loaded set as shown by the gallery.
#[derive(Debug, Clone)]
pub struct SetView {
    /// Set header information.
    pub metadata: SetMetadata,

    /// Grouped inventory.
    pub groups: Vec<PartGroup>,

    /// Page at which pagination stopped early, if it did.
    pub failed_page: Option<u32>,
}

/// A set load the run loop should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Set to load.
    pub set_num: String,

    /// Drop cached entries for the set first.
    pub reload: bool,
}

/// The main application state.
pub struct App {
    /// The configuration.
    pub config: Config,

    categories: CategoryTable,
    favourites: FavouriteSets,

    /// Current UI mode.
    pub mode: AppMode,

    /// Which panel has focus.
    pub focus: Focus,

    /// Current filter configuration.
    pub filter: FilterState,

    options: FilterOptions,
    set: Option<SetView>,
    load_error: Option<String>,
    cards: Vec<CardRef>,

    /// Gallery cursor.
    pub gallery_state: CursorState,

    /// Color picker cursor.
    pub color_state: CursorState,

    /// Category picker cursor.
    pub category_state: CursorState,

    /// Set picker overlay state.
    pub set_picker: SetPickerState,

    /// Status message to display.
    pub status: Option<StatusMessage>,

    pending_load: Option<LoadRequest>,
    loading: Option<String>,
    last_requested: Option<String>,

    /// Whether the application should quit.
    pub should_quit: bool,

    /// Terminal size (updated on resize).
    pub terminal_size: Rect,
}

impl App {
    /// Creates the application and queues the initial set.
    ///
    /// The initial set is `config.default_set`, then the first favourite.
    /// With neither, the set picker opens instead.
    #[must_use]
    pub fn new(config: Config, reference: ReferenceData) -> Self {
        let initial = config
            .default_set
            .clone()
            .or_else(|| reference.favourites.first().map(|f| f.set_num.clone()));

        let mut app = Self {
            config,
            categories: reference.categories,
            favourites: reference.favourites,
            mode: AppMode::Normal,
            focus: Focus::Gallery,
            filter: FilterState::default(),
            options: FilterOptions::default(),
            set: None,
            load_error: None,
            cards: Vec::new(),
            gallery_state: CursorState::new(),
            color_state: CursorState::new(),
            category_state: CursorState::new(),
            set_picker: SetPickerState::default(),
            status: None,
            pending_load: None,
            loading: None,
            last_requested: None,
            should_quit: false,
            terminal_size: Rect::default(),
        };

        match initial {
            Some(set_num) => app.request_load(&set_num, false),
            None => {
                app.mode = AppMode::SetPicker;
                app.status = Some(StatusMessage::info("Enter a set number to browse"));
            }
        }
        app
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handles a key event and returns the resulting action.
    #[must_use]
    pub fn handle_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search(_) => Self::handle_search_key(key),
            AppMode::SetPicker => Self::handle_set_picker_key(key),
            AppMode::Help => Self::handle_help_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('j') | KeyCode::Down => Action::NextItem,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousItem,
            KeyCode::Char('g') | KeyCode::Home => Action::FirstItem,
            KeyCode::Char('G') | KeyCode::End => Action::LastItem,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Tab => Action::NextFocus,
            KeyCode::BackTab => Action::PreviousFocus,
            KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleOption,
            KeyCode::Char('/') => Action::EnterSearch(SearchField::PartName),
            KeyCode::Char('c') => Action::EnterSearch(SearchField::Color),
            KeyCode::Char('t') => Action::EnterSearch(SearchField::Category),
            KeyCode::Char('+' | '=') => Action::IncreaseMinQuantity,
            KeyCode::Char('-') => Action::DecreaseMinQuantity,
            KeyCode::Char('x') => Action::ClearFilters,
            KeyCode::Char('s') => Action::OpenSetPicker,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Esc if self.filter.is_active() => Action::ClearFilters,
            _ => Action::None,
        }
    }

    fn handle_search_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::ExitSearch,
            KeyCode::Tab => Action::CycleSearchField,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char(c) => Action::SearchInput(c.to_string()),
            _ => Action::None,
        }
    }

    fn handle_set_picker_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::CloseSetPicker,
            KeyCode::Enter => Action::ConfirmSetPicker,
            KeyCode::Down => Action::NextItem,
            KeyCode::Up => Action::PreviousItem,
            KeyCode::Backspace => Action::SetInputBackspace,
            KeyCode::Char(c) => Action::SetInput(c.to_string()),
            _ => Action::None,
        }
    }

    fn handle_help_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Action::HideHelp,
            _ => Action::None,
        }
    }

    /// Handles pasted text; only the text inputs accept it.
    #[must_use]
    pub fn handle_paste(&self, text: &str) -> Action {
        let line: String = text.chars().filter(|c| !c.is_control()).collect();
        match self.mode {
            AppMode::Search(_) => Action::SearchInput(line),
            AppMode::SetPicker => Action::SetInput(line.trim().to_owned()),
            AppMode::Normal | AppMode::Help => Action::None,
        }
    }

    /// Handles a mouse event; the wheel scrolls the focused list.
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> Action {
        if self.mode == AppMode::Help {
            return Action::None;
        }
        match event.kind {
            MouseEventKind::ScrollDown => Action::NextItem,
            MouseEventKind::ScrollUp => Action::PreviousItem,
            _ => Action::None,
        }
    }

    // =========================================================================
    // State updates
    // =========================================================================

    /// Updates the application state based on an action.
    ///
    /// Actions that change the filter re-derive the options and gallery
    /// before returning.
    #[allow(clippy::match_same_arms)]
    pub fn update(&mut self, action: Action) {
        if action.is_navigation() {
            self.navigate(&action);
            return;
        }
        let refresh = action.modifies_filter();

        match action {
            Action::Quit => self.should_quit = true,

            Action::NextFocus => self.focus = self.focus.next(),
            Action::PreviousFocus => self.focus = self.focus.previous(),

            Action::EnterSearch(field) => self.mode = AppMode::Search(field),
            Action::ExitSearch => self.mode = AppMode::Normal,
            Action::CycleSearchField => {
                if let AppMode::Search(field) = self.mode {
                    self.mode = AppMode::Search(field.next());
                }
            }
            Action::SearchInput(text) => {
                if let AppMode::Search(field) = self.mode {
                    for c in text.chars() {
                        self.filter.push_search_char(field, c);
                    }
                }
            }
            Action::SearchBackspace => {
                if let AppMode::Search(field) = self.mode {
                    self.filter.pop_search_char(field);
                }
            }

            Action::ToggleOption => self.toggle_option(),
            Action::IncreaseMinQuantity => {
                let next = self.filter.min_quantity().max(1).saturating_add(1);
                self.filter.set_min_quantity(next);
            }
            Action::DecreaseMinQuantity => {
                let next = self.filter.min_quantity().saturating_sub(1).max(1);
                self.filter.set_min_quantity(next);
            }
            Action::ClearFilters => {
                self.filter.clear();
                self.mode = AppMode::Normal;
                self.status = Some(StatusMessage::info("Filters cleared"));
            }

            Action::OpenSetPicker => self.open_set_picker(),
            Action::CloseSetPicker => self.mode = AppMode::Normal,
            Action::SetInput(text) => self.set_picker.input.push_str(&text),
            Action::SetInputBackspace => {
                self.set_picker.input.pop();
            }
            Action::ConfirmSetPicker => self.confirm_set_picker(),
            Action::Reload => match self.last_requested.clone() {
                Some(set_num) => self.request_load(&set_num, true),
                None => self.status = Some(StatusMessage::error("No set loaded")),
            },

            Action::ToggleHelp => {
                self.mode = if self.mode == AppMode::Help {
                    AppMode::Normal
                } else {
                    AppMode::Help
                };
            }
            Action::HideHelp => self.mode = AppMode::Normal,

            Action::Tick => self.tick(),

            Action::NextItem
            | Action::PreviousItem
            | Action::FirstItem
            | Action::LastItem
            | Action::PageDown
            | Action::PageUp
            | Action::Render
            | Action::None => {}
        }

        if refresh {
            self.refresh();
        }
    }

    fn navigate(&mut self, action: &Action) {
        let len = self.active_len();
        let cursor = self.active_cursor_mut();
        match action {
            Action::NextItem => cursor.select_next(len),
            Action::PreviousItem => cursor.select_previous(len),
            Action::FirstItem => cursor.select_first(len),
            Action::LastItem => cursor.select_last(len),
            Action::PageDown => cursor.page_down(len),
            Action::PageUp => cursor.page_up(len),
            _ => {}
        }
    }

    /// Handles a tick event (periodic update).
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::should_hide) {
            self.status = None;
        }
    }

    /// Updates the terminal size and the page sizes derived from it.
    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
        let heights = ui::list_heights(size);
        self.gallery_state.visible_height = heights.gallery;
        self.color_state.visible_height = heights.picker;
        self.category_state.visible_height = heights.picker;
        self.set_picker.cursor.visible_height = heights.overlay;
    }

    fn toggle_option(&mut self) {
        match self.focus {
            Focus::Gallery => {}
            Focus::Colors => {
                let picked = self
                    .color_state
                    .selected
                    .and_then(|i| self.options.colors.get(i))
                    .cloned();
                if let Some(color) = picked {
                    self.filter.toggle_color(&color);
                }
            }
            Focus::Categories => {
                let picked = self
                    .category_state
                    .selected
                    .and_then(|i| self.options.categories.get(i))
                    .cloned();
                if let Some(category) = picked {
                    self.filter.toggle_category(&category);
                }
            }
        }
    }

    fn open_set_picker(&mut self) {
        self.set_picker.input.clear();
        let current = self.current_set_num();
        let index = current
            .as_deref()
            .and_then(|set_num| self.favourites.iter().position(|f| f.set_num == set_num));
        match index {
            Some(i) => self.set_picker.cursor.selected = Some(i),
            None => self.set_picker.cursor.clamp(self.favourites.len()),
        }
        self.mode = AppMode::SetPicker;
    }

    fn confirm_set_picker(&mut self) {
        let typed = self.set_picker.input.trim();
        let target = if typed.is_empty() {
            self.set_picker
                .cursor
                .selected
                .and_then(|i| self.favourites.get(i))
                .map(|f| f.set_num.clone())
        } else {
            Some(typed.to_owned())
        };

        match target {
            Some(set_num) => {
                self.mode = AppMode::Normal;
                self.request_load(&set_num, false);
            }
            None => self.status = Some(StatusMessage::error("Enter a set number")),
        }
    }

    fn request_load(&mut self, set_num: &str, reload: bool) {
        let set_num = set_num.trim();
        if set_num.is_empty() {
            return;
        }
        debug!(set = set_num, reload, "Queued set load");
        self.last_requested = Some(set_num.to_owned());
        self.pending_load = Some(LoadRequest {
            set_num: set_num.to_owned(),
            reload,
        });
    }

    /// Re-derives picker options and the gallery from the current state.
    ///
    /// Selections that are no longer offered are pruned first, so the
    /// gallery never filters by something the pickers do not show.
    pub fn refresh(&mut self) {
        let groups: &[PartGroup] = self.set.as_ref().map_or(&[], |set| set.groups.as_slice());
        self.options = self.filter.reconcile(groups);
        self.cards = gallery::project(groups, &self.filter);

        self.gallery_state.clamp(self.cards.len());
        self.color_state.clamp(self.options.colors.len());
        self.category_state.clamp(self.options.categories.len());
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Returns the queued load and marks it as in flight.
    pub fn take_pending_load(&mut self) -> Option<LoadRequest> {
        let request = self.pending_load.take()?;
        self.loading = Some(request.set_num.clone());
        Some(request)
    }

    /// Installs the result of a load.
    ///
    /// On failure nothing of the previous set is kept: the gallery is empty
    /// and the error is shown in its place.
    pub fn finish_load(&mut self, request: &LoadRequest, result: Result<LoadedSet, ClientError>) {
        self.loading = None;

        match result {
            Ok(loaded) => {
                let records = loaded.inventory.records.iter().cloned();
                let groups = grouping::group(records, &self.categories);
                let failed_page = loaded.inventory.failed_page;
                info!(
                    set = %loaded.metadata.set_num,
                    parts = groups.len(),
                    truncated = failed_page.is_some(),
                    "Set loaded"
                );

                self.status = Some(match failed_page {
                    Some(page) => StatusMessage::error(format!(
                        "Inventory incomplete: page {page} failed (r to reload)"
                    )),
                    None => StatusMessage::info(format!(
                        "Loaded {} ({} parts)",
                        loaded.metadata.title(),
                        groups.len()
                    )),
                });
                self.set = Some(SetView {
                    metadata: loaded.metadata,
                    groups,
                    failed_page,
                });
                self.load_error = None;
            }
            Err(e) => {
                if e.is_recoverable() {
                    warn!(set = %request.set_num, error = %e, "Set load failed");
                } else {
                    error!(set = %request.set_num, error = %e, "Set load failed");
                }
                let message = format!("Could not load set {}: {e}", request.set_num);
                self.status = Some(StatusMessage::error(message.clone()));
                self.set = None;
                self.load_error = Some(message);
            }
        }

        self.gallery_state.select_first(0);
        self.refresh();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the loaded set, if any.
    #[must_use]
    pub const fn set(&self) -> Option<&SetView> {
        self.set.as_ref()
    }

    /// Returns the part groups of the loaded set.
    #[must_use]
    pub fn groups(&self) -> &[PartGroup] {
        self.set.as_ref().map_or(&[], |set| set.groups.as_slice())
    }

    /// Returns the error of the last failed load.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Returns the set currently being fetched.
    #[must_use]
    pub fn loading(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    /// Returns the options offered by the pickers.
    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Returns the favourite sets.
    #[must_use]
    pub const fn favourites(&self) -> &FavouriteSets {
        &self.favourites
    }

    /// Returns the cards visible in the gallery.
    #[must_use]
    pub fn cards(&self) -> Vec<PartCard<'_>> {
        let groups = self.groups();
        self.cards.iter().filter_map(|card| card.resolve(groups)).collect()
    }

    /// Returns the number of visible cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Returns the card under the gallery cursor.
    #[must_use]
    pub fn selected_card(&self) -> Option<PartCard<'_>> {
        self.gallery_state
            .selected
            .and_then(|i| self.cards.get(i))
            .and_then(|card| card.resolve(self.groups()))
    }

    /// Returns counts for the visible gallery.
    #[must_use]
    pub fn summary(&self) -> GallerySummary {
        GallerySummary::of_refs(&self.cards, self.groups())
    }

    fn current_set_num(&self) -> Option<String> {
        self.set.as_ref().map(|set| set.metadata.set_num.clone())
    }

    fn active_len(&self) -> usize {
        if self.mode == AppMode::SetPicker {
            return self.favourites.len();
        }
        match self.focus {
            Focus::Gallery => self.cards.len(),
            Focus::Colors => self.options.colors.len(),
            Focus::Categories => self.options.categories.len(),
        }
    }

    fn active_cursor_mut(&mut self) -> &mut CursorState {
        if self.mode == AppMode::SetPicker {
            return &mut self.set_picker.cursor;
        }
        match self.focus {
            Focus::Gallery => &mut self.gallery_state,
            Focus::Colors => &mut self.color_state,
            Focus::Categories => &mut self.category_state,
        }
    }
}
