//! Multi-select picker for colors or categories.

use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, HighlightSpacing, List, ListItem, ListState, StatefulWidget,
};

use crate::app::CursorState;
use crate::theme::Theme;

/// A checkbox list over the options derived for the loaded set.
///
/// Uses [`StatefulWidget`] with the app's [`CursorState`].
pub struct OptionPicker<'a> {
    title: &'a str,
    options: &'a [String],
    selected: &'a BTreeSet<String>,
    focused: bool,
    /// Paint a color swatch before each entry.
    swatches: bool,
    theme: &'a Theme,
}

impl<'a> OptionPicker<'a> {
    /// Creates a picker.
    #[must_use]
    pub const fn new(
        title: &'a str,
        options: &'a [String],
        selected: &'a BTreeSet<String>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            options,
            selected,
            focused,
            swatches: false,
            theme,
        }
    }

    /// Paints a swatch before each entry.
    #[must_use]
    pub const fn with_swatches(mut self) -> Self {
        self.swatches = true;
        self
    }

    fn item(&self, option: &'a str) -> ListItem<'a> {
        let checked = self.selected.contains(option);
        let mut spans = Vec::with_capacity(3);

        spans.push(if checked {
            Span::styled("[x] ", self.theme.checked_style())
        } else {
            Span::styled("[ ] ", self.theme.dimmed_style())
        });
        if self.swatches {
            spans.push(Span::styled("■ ", self.theme.swatch_style(option)));
        }
        spans.push(Span::styled(
            option,
            if checked {
                self.theme.checked_style()
            } else {
                self.theme.base_style()
            },
        ));

        ListItem::new(Line::from(spans))
    }
}

impl StatefulWidget for &OptionPicker<'_> {
    type State = CursorState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = if self.selected.is_empty() {
            format!(" {} ({}) ", self.title, self.options.len())
        } else {
            format!(
                " {} ({} of {}) ",
                self.title,
                self.selected.len(),
                self.options.len()
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused))
            .title(Span::styled(title, self.theme.header_style));

        let items: Vec<ListItem<'_>> = self.options.iter().map(|o| self.item(o)).collect();
        let highlight = if self.focused {
            self.theme.highlight_style
        } else {
            self.theme.base_style()
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default()
            .with_selected(state.selected)
            .with_offset(state.scroll_offset);
        StatefulWidget::render(list, area, buf, &mut list_state);
        state.scroll_offset = list_state.offset();
    }
}
