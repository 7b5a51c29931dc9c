//! Detail pane for the card under the gallery cursor.

use bv_core::PartCard;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

/// Lists every visible variant of one part with its image URL.
pub struct CardDetail<'a> {
    card: Option<&'a PartCard<'a>>,
    theme: &'a Theme,
}

impl<'a> CardDetail<'a> {
    /// Creates a detail pane.
    #[must_use]
    pub const fn new(card: Option<&'a PartCard<'a>>, theme: &'a Theme) -> Self {
        Self { card, theme }
    }

    fn lines(&self, card: &PartCard<'a>) -> Vec<Line<'a>> {
        let group = card.group;
        let mut lines = vec![Line::from(vec![
            Span::styled(group.part_name.as_str(), self.theme.accent_style()),
            Span::styled(format!("  #{}", group.part_num), self.theme.dimmed_style()),
            Span::styled(format!("  {}", group.category), self.theme.base_style()),
            Span::styled(
                format!("  {} of {} pieces shown", card.visible_quantity(), group.total_quantity()),
                self.theme.quantity_style(),
            ),
        ])];

        for &variant in &card.variants {
            let image = variant.image_url.as_deref().unwrap_or("no image");
            lines.push(Line::from(vec![
                Span::styled("■ ", self.theme.swatch_style(&variant.color)),
                Span::styled(format!("{:<20}", variant.color), self.theme.base_style()),
                Span::styled(format!("×{:<5}", variant.quantity), self.theme.quantity_style()),
                Span::styled(format!("{:<10} ", variant.element_id), self.theme.dimmed_style()),
                Span::styled(image, self.theme.dimmed_style()),
            ]));
        }
        lines
    }
}

impl Widget for &CardDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(" Details ", self.theme.header_style));

        let lines = match self.card {
            Some(card) => self.lines(card),
            None => vec![Line::from(Span::styled(
                "No part selected",
                self.theme.dimmed_style(),
            ))],
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use bv_core::{CategoryTable, FilterState, PartRecord, gallery, grouping};

    use super::*;

    #[test]
    fn test_detail_lists_image_urls() {
        let theme = Theme::dark();
        let groups = grouping::group(
            vec![
                PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 5)
                    .with_image_url("https://cdn.example/300121.jpg"),
                PartRecord::new("300123", "3001", "Brick 2 x 4", "Blue", 1),
            ],
            &CategoryTable::builtin(),
        );
        let cards = gallery::render(&groups, &FilterState::default());

        let area = Rect::new(0, 0, 110, 6);
        let mut buf = Buffer::empty(area);
        CardDetail::new(cards.first(), &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();

        assert!(text.contains("https://cdn.example/300121.jpg"));
        assert!(text.contains("no image"));
        assert!(text.contains("#3001"));
        assert!(text.contains("6 of 6 pieces shown"));
    }

    #[test]
    fn test_detail_placeholder() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        CardDetail::new(None, &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("No part selected"));
    }
}
