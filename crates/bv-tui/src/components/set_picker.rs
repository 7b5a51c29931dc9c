//! Set picker overlay: favourites plus manual set id entry.

use bv_core::FavouriteSets;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph,
    StatefulWidget, Widget,
};

use crate::app::SetPickerState;
use crate::theme::Theme;

/// Modal overlay for choosing the set to browse.
pub struct SetPicker<'a> {
    favourites: &'a FavouriteSets,
    state: &'a SetPickerState,
    /// Set currently shown, marked in the list.
    current: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SetPicker<'a> {
    /// Creates the overlay.
    #[must_use]
    pub const fn new(
        favourites: &'a FavouriteSets,
        state: &'a SetPickerState,
        current: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            favourites,
            state,
            current,
            theme,
        }
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let line = if self.state.input.is_empty() {
            Line::from(vec![
                Span::styled(
                    "Type a set number, e.g. 10497-1",
                    self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
                ),
                Span::styled("▌", self.theme.accent_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled(self.state.input.as_str(), self.theme.base_style()),
                Span::styled("▌", self.theme.accent_style()),
            ])
        };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);
        Paragraph::new(line).block(block).render(area, buf);
    }

    fn render_favourites(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem<'_>> = self
            .favourites
            .iter()
            .map(|favourite| {
                let marker = if self.current == Some(favourite.set_num.as_str()) {
                    Span::styled("● ", self.theme.accent_style())
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(format!("{:<10}", favourite.set_num), self.theme.dimmed_style()),
                    Span::styled(favourite.name.as_str(), self.theme.base_style()),
                ]))
            })
            .collect();

        // The typed id wins on Enter, so the highlight is dimmed while typing.
        let highlight = if self.state.input.trim().is_empty() {
            self.theme.highlight_style
        } else {
            self.theme.dimmed_style()
        };

        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");
        let mut list_state = ListState::default()
            .with_selected(self.state.cursor.selected)
            .with_offset(self.state.cursor.scroll_offset);
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

impl Widget for &SetPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Choose a set (Enter to load, Esc to cancel) ",
                self.theme.header_style,
            ))
            .style(Style::default().bg(self.theme.overlay_bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        self.render_input(chunks[0], buf);
        if self.favourites.is_empty() {
            Paragraph::new(Span::styled("No favourites configured", self.theme.dimmed_style()))
                .render(chunks[1], buf);
        } else {
            self.render_favourites(chunks[1], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CursorState;

    fn render_to_string(picker: &SetPicker<'_>) -> String {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        picker.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_picker_lists_favourites() {
        let theme = Theme::dark();
        let favourites = FavouriteSets::builtin();
        let state = SetPickerState {
            cursor: CursorState {
                selected: Some(0),
                ..CursorState::new()
            },
            input: String::new(),
        };
        let text = render_to_string(&SetPicker::new(&favourites, &state, Some("10497-1"), &theme));

        assert!(text.contains("Millennium Falcon"));
        assert!(text.contains("● 10497-1"));
        assert!(text.contains("Type a set number"));
    }

    #[test]
    fn test_picker_shows_typed_id() {
        let theme = Theme::dark();
        let favourites = FavouriteSets::default();
        let state = SetPickerState {
            cursor: CursorState::new(),
            input: "6020-1".to_owned(),
        };
        let text = render_to_string(&SetPicker::new(&favourites, &state, None, &theme));

        assert!(text.contains("6020-1▌"));
        assert!(text.contains("No favourites configured"));
    }
}
