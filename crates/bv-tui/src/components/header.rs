//! Set header component.
//!
//! Shows the loaded set's name, number, year, theme and part count, plus the
//! catalog attribution.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::app::SetView;
use crate::theme::Theme;

/// Attribution required by the catalog's terms of use.
pub const ATTRIBUTION: &str = "Powered by Rebrickable";

/// The set header component.
pub struct SetHeader<'a> {
    set: Option<&'a SetView>,
    loading: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SetHeader<'a> {
    /// Creates a new header.
    #[must_use]
    pub const fn new(set: Option<&'a SetView>, loading: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            set,
            loading,
            theme,
        }
    }

    fn title_line(&self) -> Line<'a> {
        let separator = Span::styled(" │ ", self.theme.dimmed_style());
        let mut spans = vec![Span::styled("brickview", self.theme.header_style), separator.clone()];

        match self.set {
            Some(set) => {
                let meta = &set.metadata;
                spans.push(Span::styled(meta.name.clone(), self.theme.accent_style()));
                spans.push(Span::styled(format!(" ({})", meta.set_num), self.theme.base_style()));
                spans.push(separator.clone());
                spans.push(Span::styled(meta.year.to_string(), self.theme.base_style()));
                spans.push(separator.clone());
                spans.push(Span::styled(meta.theme_name.clone(), self.theme.base_style()));
                spans.push(separator);
                spans.push(Span::styled(
                    format!("{} parts", meta.num_parts),
                    self.theme.quantity_style(),
                ));
            }
            None => spans.push(Span::styled("no set loaded", self.theme.dimmed_style())),
        }

        Line::from(spans)
    }

    fn detail_line(&self) -> Line<'a> {
        if let Some(set_num) = self.loading {
            return Line::from(Span::styled(
                format!("Loading {set_num}…"),
                self.theme.warning_style(),
            ));
        }

        match self.set {
            Some(set) => {
                let mut spans = vec![Span::styled(
                    set.metadata.image_url.clone().unwrap_or_default(),
                    self.theme.dimmed_style(),
                )];
                if let Some(page) = set.failed_page {
                    spans.push(Span::styled(
                        format!("  inventory stopped at page {page}"),
                        self.theme.warning_style(),
                    ));
                }
                Line::from(spans)
            }
            None => Line::from(Span::styled(
                "Press s to choose a set",
                self.theme.dimmed_style(),
            )),
        }
    }
}

impl Widget for &SetHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Attribution keeps its column; the set details are clipped instead.
        let attribution_width = u16::try_from(ATTRIBUTION.width() + 1).unwrap_or(u16::MAX);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(attribution_width)])
            .split(inner);

        Paragraph::new(vec![self.title_line(), self.detail_line()]).render(columns[0], buf);

        Paragraph::new(Line::from(Span::styled(ATTRIBUTION, self.theme.dimmed_style())))
            .alignment(Alignment::Right)
            .render(columns[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use bv_core::SetMetadata;

    use super::*;

    fn render_to_string(header: &SetHeader<'_>) -> String {
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_header_shows_set_and_attribution() {
        let theme = Theme::dark();
        let set = SetView {
            metadata: SetMetadata::new("10497-1", "Galaxy Explorer", 2022, 1254, 721)
                .with_theme_name("Icons"),
            groups: Vec::new(),
            failed_page: Some(3),
        };
        let text = render_to_string(&SetHeader::new(Some(&set), None, &theme));

        assert!(text.contains("Galaxy Explorer"));
        assert!(text.contains("10497-1"));
        assert!(text.contains("Icons"));
        assert!(text.contains("page 3"));
        assert!(text.contains(ATTRIBUTION));
    }

    #[test]
    fn test_header_while_loading() {
        let theme = Theme::light();
        let text = render_to_string(&SetHeader::new(None, Some("75192-1"), &theme));
        assert!(text.contains("Loading 75192-1"));
        assert!(text.contains("no set loaded"));
    }
}
