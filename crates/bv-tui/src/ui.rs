//! Main UI layout and rendering orchestration.
//!
//! # Layout Structure
//!
//! ```text
//! +------------------------------------------------------------------+
//! | brickview | Galaxy Explorer (10497-1) | 2022 | Icons   Powered by |
//! | https://cdn.rebrickable.com/media/sets/10497-1.jpg                |
//! +------------------------------------------------------------------+
//! | Color      | Category      | Part           | Min qty             |
//! +------------------------------------------------------------------+
//! | Colors        |  Parts (n shown, m colors, k pieces)              |
//! | [x] Red       |  > Brick 2 x 4   Bricks   ■ Red ×5  300121        |
//! | [ ] Blue      |    3001                   ■ Blue ×1 300123        |
//! |---------------|                                                   |
//! | Categories    |---------------------------------------------------|
//! | [ ] Bricks    |  Details (selected part, image URLs)              |
//! +------------------------------------------------------------------+
//! | BROWSE  Loaded Galaxy Explorer | Filter: ... | 3/120 parts        |
//! +------------------------------------------------------------------+
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{App, AppMode, Focus};
use crate::components::{
    CardDetail, Gallery, HelpPanel, OptionPicker, SearchBar, SetHeader, SetPicker, StatusBar,
};
use crate::theme::Theme;

const HEADER_HEIGHT: u16 = 3;
const SEARCH_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const PICKER_WIDTH: u16 = 32;
const DETAIL_HEIGHT: u16 = 8;

/// Approximate lines per gallery row, including its bottom margin.
const GALLERY_ROW_LINES: u16 = 3;

const SET_PICKER_PERCENT: (u16, u16) = (60, 60);

/// Page sizes derived from the terminal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListHeights {
    /// Gallery rows per page.
    pub gallery: usize,
    /// Entries per page in each option picker.
    pub picker: usize,
    /// Entries per page in the set picker overlay.
    pub overlay: usize,
}

/// Computes how many list entries fit on screen for `size`.
#[must_use]
pub fn list_heights(size: Rect) -> ListHeights {
    let main = size
        .height
        .saturating_sub(HEADER_HEIGHT + SEARCH_HEIGHT + STATUS_HEIGHT);

    // Borders (2) and the table header with its margin (2).
    let gallery_lines = main.saturating_sub(DETAIL_HEIGHT + 4);
    let picker_lines = (main / 2).saturating_sub(2);
    // Borders (2) and the input line with its separator (2).
    let overlay_rows = u32::from(size.height) * u32::from(SET_PICKER_PERCENT.1) / 100;
    let overlay_lines = u16::try_from(overlay_rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(4);

    ListHeights {
        gallery: usize::from(gallery_lines / GALLERY_ROW_LINES),
        picker: usize::from(picker_lines),
        overlay: usize::from(overlay_lines),
    }
}

/// Renders the entire UI based on the current application state.
pub fn render(app: &App, frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let header = SetHeader::new(app.set(), app.loading(), theme);
    frame.render_widget(&header, main_chunks[0]);

    let active_search = match app.mode {
        AppMode::Search(field) => Some(field),
        _ => None,
    };
    let search_bar = SearchBar::new(&app.filter, active_search, theme);
    frame.render_widget(&search_bar, main_chunks[1]);

    render_main_content(app, frame, main_chunks[2], theme);

    let status_bar = StatusBar::new(app, theme);
    frame.render_widget(&status_bar, main_chunks[3]);

    match app.mode {
        AppMode::SetPicker => {
            let current = app.set().map(|set| set.metadata.set_num.as_str());
            let picker = SetPicker::new(app.favourites(), &app.set_picker, current, theme);
            let (x, y) = SET_PICKER_PERCENT;
            frame.render_widget(&picker, centered_rect(x, y, area));
        }
        AppMode::Help => {
            let help_panel = HelpPanel::new(theme);
            frame.render_widget(&help_panel, centered_rect(60, 70, area));
        }
        AppMode::Normal | AppMode::Search(_) => {}
    }
}

/// Renders the pickers, gallery and detail pane.
fn render_main_content(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PICKER_WIDTH), Constraint::Min(40)])
        .split(area);

    let pickers = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let options = app.options();
    let colors = OptionPicker::new(
        "Colors",
        &options.colors,
        app.filter.selected_colors(),
        app.focus == Focus::Colors,
        theme,
    )
    .with_swatches();
    frame.render_stateful_widget(&colors, pickers[0], &mut app.color_state.clone());

    let categories = OptionPicker::new(
        "Categories",
        &options.categories,
        app.filter.selected_categories(),
        app.focus == Focus::Categories,
        theme,
    );
    frame.render_stateful_widget(&categories, pickers[1], &mut app.category_state.clone());

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(DETAIL_HEIGHT)])
        .split(columns[1]);

    let cards = app.cards();
    let empty_message = empty_message(app);
    let gallery = Gallery::new(
        &cards,
        app.summary(),
        &empty_message,
        app.focus == Focus::Gallery,
        theme,
    );
    frame.render_stateful_widget(&gallery, right[0], &mut app.gallery_state.clone());

    let selected = app.selected_card();
    let detail = CardDetail::new(selected.as_ref(), theme);
    frame.render_widget(&detail, right[1]);
}

/// Text shown in place of an empty gallery.
fn empty_message(app: &App) -> String {
    if let Some(set_num) = app.loading() {
        return format!("Loading {set_num}…");
    }
    if let Some(error) = app.load_error() {
        return error.to_owned();
    }
    match app.set() {
        None => "No set loaded. Press s to choose one.".to_owned(),
        Some(set) if set.groups.is_empty() => "This set has no parts.".to_owned(),
        Some(_) => "No parts match the current filters. Press x to clear them.".to_owned(),
    }
}

/// Creates a centered rectangle with the given percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
