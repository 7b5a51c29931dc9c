//! Keyboard-driven browsing sessions against a fabricated set.

use std::sync::Arc;

use bv_client::{Inventory, LoadedSet};
use bv_core::{Config, PartRecord, ReferenceData, SearchField, SetMetadata};
use bv_tui::{Action, App, AppMode, Focus, Theme, ui};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

fn press(app: &mut App, code: KeyCode) {
    let action = app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    app.update(action);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn galaxy_explorer() -> LoadedSet {
    LoadedSet {
        metadata: SetMetadata::new("10497-1", "Galaxy Explorer", 2022, 1254, 721)
            .with_theme_name("Icons"),
        inventory: Arc::new(Inventory::complete(vec![
            PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 2).with_category(11),
            PartRecord::new("300123", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
            PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 3).with_category(11),
            PartRecord::new("4140684", "6014", "Wheel 11mm D. x 6mm", "White", 4)
                .with_category(29),
            PartRecord::new("4619323", "87697", "Tyre 21mm D. x 9.9mm", "Black", 4)
                .with_category(29),
        ])),
    }
}

fn started_app() -> App {
    let config = Config {
        default_set: Some("10497-1".to_owned()),
        ..Config::default()
    };
    let mut app = App::new(config, ReferenceData::builtin());
    app.set_terminal_size(Rect::new(0, 0, 120, 40));

    let request = app.take_pending_load().unwrap();
    assert_eq!(request.set_num, "10497-1");
    app.finish_load(&request, Ok(galaxy_explorer()));
    app
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal
        .draw(|frame| ui::render(app, frame, &Theme::default()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn color_search_then_pick_narrows_the_gallery() {
    let mut app = started_app();
    assert_eq!(app.card_count(), 3);

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.mode, AppMode::Search(SearchField::Color));
    type_text(&mut app, "bl");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.options().colors, vec!["Black", "Blue"]);
    assert_eq!(app.card_count(), 2);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Focus::Colors);
    press(&mut app, KeyCode::Char(' '));
    assert!(app.filter.selected_colors().contains("Black"));

    let parts: Vec<String> = app
        .cards()
        .iter()
        .map(|card| card.group.part_num.clone())
        .collect();
    assert_eq!(parts, vec!["87697"]);

    let text = screen(&app);
    assert!(text.contains("Tyre 21mm"));
    assert!(!text.contains("Brick 2 x 4"));
    assert!(text.contains("1/3 parts"));
}

#[test]
fn minimum_quantity_and_clear() {
    let mut app = started_app();

    for _ in 0..4 {
        press(&mut app, KeyCode::Char('+'));
    }
    assert_eq!(app.filter.min_quantity(), 5);
    assert_eq!(app.card_count(), 1);
    assert_eq!(app.summary().pieces, 5);

    press(&mut app, KeyCode::Char('-'));
    assert_eq!(app.card_count(), 3);
    assert_eq!(app.summary().variants, 3);

    press(&mut app, KeyCode::Esc);
    assert!(!app.filter.is_active());
    assert_eq!(app.summary().variants, 4);
}

#[test]
fn set_picker_queues_typed_set_and_keeps_filters() {
    let mut app = started_app();
    app.update(Action::EnterSearch(SearchField::Category));
    type_text(&mut app, "wheel");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.card_count(), 2);

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.mode, AppMode::SetPicker);
    assert!(screen(&app).contains("Choose a set"));

    let action = app.handle_paste("  6020-1\n");
    app.update(action);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, AppMode::Normal);

    let request = app.take_pending_load().unwrap();
    assert_eq!(request.set_num, "6020-1");
    assert!(!request.reload);
    assert_eq!(app.loading(), Some("6020-1"));
    assert!(screen(&app).contains("Loading 6020-1"));

    app.finish_load(&request, Ok(galaxy_explorer()));
    assert_eq!(app.filter.search(SearchField::Category), "wheel");
    assert_eq!(app.card_count(), 2);
}

#[test]
fn reload_requests_fresh_fetch_of_current_set() {
    let mut app = started_app();
    press(&mut app, KeyCode::Char('r'));

    let request = app.take_pending_load().unwrap();
    assert_eq!(request.set_num, "10497-1");
    assert!(request.reload);
}

#[test]
fn quit_from_any_mode() {
    let mut app = started_app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "q");
    assert!(!app.should_quit);
    assert_eq!(app.filter.search(SearchField::PartName), "q");

    let action = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    app.update(action);
    assert!(app.should_quit);
}
