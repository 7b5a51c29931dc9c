//! Results gallery.
//!
//! One row per visible part: name and number, category, and a sub-line per
//! visible color variant with its quantity and element id.

use bv_core::{GallerySummary, PartCard};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table, TableState,
    Widget, Wrap,
};

use crate::app::CursorState;
use crate::theme::Theme;

/// A stateful gallery of part cards.
pub struct Gallery<'a> {
    cards: &'a [PartCard<'a>],
    summary: GallerySummary,
    /// Shown instead of the table when there are no cards.
    empty_message: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Gallery<'a> {
    /// Creates a gallery view.
    #[must_use]
    pub const fn new(
        cards: &'a [PartCard<'a>],
        summary: GallerySummary,
        empty_message: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            cards,
            summary,
            empty_message,
            focused,
            theme,
        }
    }

    fn block(&self) -> Block<'a> {
        let title = format!(
            " Parts ({} shown, {} colors, {} pieces) ",
            self.summary.parts, self.summary.variants, self.summary.pieces
        );
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused))
            .title(Span::styled(title, self.theme.header_style))
    }

    fn row(&self, card: &PartCard<'a>) -> Row<'a> {
        let group = card.group;

        let part = Text::from(vec![
            Line::from(Span::styled(
                group.part_name.as_str(),
                self.theme.base_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(group.part_num.as_str(), self.theme.dimmed_style())),
        ]);

        let variants: Vec<Line<'a>> = card
            .variants
            .iter()
            .map(|&variant| {
                Line::from(vec![
                    Span::styled("■ ", self.theme.swatch_style(&variant.color)),
                    Span::styled(variant.color.as_str(), self.theme.base_style()),
                    Span::styled(format!(" ×{}", variant.quantity), self.theme.quantity_style()),
                    Span::styled(format!("  {}", variant.element_id), self.theme.dimmed_style()),
                ])
            })
            .collect();

        let height = u16::try_from(card.variants.len().max(2)).unwrap_or(u16::MAX);

        Row::new(vec![
            Cell::from(part),
            Cell::from(Span::styled(group.category.as_str(), self.theme.accent_style())),
            Cell::from(Text::from(variants)),
            Cell::from(
                Line::from(Span::styled(
                    card.visible_quantity().to_string(),
                    self.theme.quantity_style(),
                ))
                .alignment(Alignment::Right),
            ),
        ])
        .height(height)
        .bottom_margin(1)
    }

    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(self.empty_message, self.theme.dimmed_style())),
        ]);
        Paragraph::new(text)
            .block(self.block())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl StatefulWidget for &Gallery<'_> {
    type State = CursorState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if self.cards.is_empty() {
            self.render_placeholder(area, buf);
            return;
        }

        let header = Row::new(vec!["Part", "Category", "Colors", "Qty"])
            .style(self.theme.dimmed_style().add_modifier(Modifier::UNDERLINED))
            .bottom_margin(1);

        let rows: Vec<Row<'_>> = self.cards.iter().map(|card| self.row(card)).collect();
        let widths = [
            Constraint::Min(24),
            Constraint::Length(24),
            Constraint::Min(28),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths)
            .block(self.block())
            .header(header)
            .row_highlight_style(if self.focused {
                self.theme.highlight_style
            } else {
                self.theme.base_style()
            })
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default()
            .with_selected(state.selected)
            .with_offset(state.scroll_offset);
        StatefulWidget::render(table, area, buf, &mut table_state);
        state.scroll_offset = table_state.offset();
    }
}

#[cfg(test)]
mod tests {
    use bv_core::{CategoryTable, FilterState, PartRecord, gallery, grouping};

    use super::*;

    fn render_to_string(view: &Gallery<'_>, state: &mut CursorState) -> String {
        let area = Rect::new(0, 0, 100, 14);
        let mut buf = Buffer::empty(area);
        StatefulWidget::render(view, area, &mut buf, state);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_gallery_renders_cards() {
        let theme = Theme::dark();
        let groups = grouping::group(
            vec![
                PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 5).with_category(11),
                PartRecord::new("300123", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
            ],
            &CategoryTable::builtin(),
        );
        let cards = gallery::render(&groups, &FilterState::default());
        let summary = GallerySummary::of_cards(&cards);
        let view = Gallery::new(&cards, summary, "nothing", true, &theme);

        let mut state = CursorState {
            selected: Some(0),
            ..CursorState::new()
        };
        let text = render_to_string(&view, &mut state);

        assert!(text.contains("Brick 2 x 4"));
        assert!(text.contains("Bricks"));
        assert!(text.contains("Red ×5"));
        assert!(text.contains("300123"));
        assert!(text.contains("1 shown, 2 colors, 6 pieces"));
    }

    #[test]
    fn test_empty_gallery_shows_message() {
        let theme = Theme::dark();
        let view = Gallery::new(&[], GallerySummary::default(), "No parts match", false, &theme);
        let text = render_to_string(&view, &mut CursorState::new());
        assert!(text.contains("No parts match"));
    }
}
