//! Search boxes for color, category and part name, plus the minimum
//! quantity.

use bv_core::{FilterState, SearchField};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

/// Row of search inputs.
pub struct SearchBar<'a> {
    filter: &'a FilterState,
    /// Field currently receiving keystrokes.
    active: Option<SearchField>,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    /// Creates a new search bar.
    #[must_use]
    pub const fn new(filter: &'a FilterState, active: Option<SearchField>, theme: &'a Theme) -> Self {
        Self {
            filter,
            active,
            theme,
        }
    }

    fn render_field(&self, field: SearchField, area: Rect, buf: &mut Buffer) {
        let focused = self.active == Some(field);
        let text = self.filter.search(field);

        let mut spans = Vec::new();
        if text.is_empty() && !focused {
            spans.push(Span::styled(
                "any",
                self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(text, self.theme.base_style()));
        }
        if focused {
            spans.push(Span::styled("▌", self.theme.accent_style()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .title(Span::styled(format!(" {} ", field.label()), self.theme.header_style));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }

    fn render_min_quantity(&self, area: Rect, buf: &mut Buffer) {
        let min = self.filter.min_quantity().max(1);
        let style = if min > 1 {
            self.theme.quantity_style()
        } else {
            self.theme.dimmed_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(" Min qty ", self.theme.header_style));

        Paragraph::new(Line::from(vec![
            Span::styled("- ", self.theme.dimmed_style()),
            Span::styled(min.to_string(), style),
            Span::styled(" +", self.theme.dimmed_style()),
        ]))
        .block(block)
        .render(area, buf);
    }
}

impl Widget for &SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Length(11),
            ])
            .split(area);

        for (field, chunk) in SearchField::ALL.into_iter().zip(chunks.iter()) {
            self.render_field(field, *chunk, buf);
        }
        self.render_min_quantity(chunks[3], buf);
    }
}
