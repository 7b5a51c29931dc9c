//! Status bar component.
//!
//! Displays the mode badge, status message, active filter summary and
//! gallery counts.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::App;
use crate::theme::Theme;

/// The status bar component.
pub struct StatusBar<'a> {
    app: &'a App,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Creates a new status bar.
    #[must_use]
    pub const fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn build_line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.app.mode.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if let Some(set_num) = self.app.loading() {
            spans.push(Span::styled(
                format!("Loading {set_num}…"),
                self.theme.warning_style(),
            ));
            spans.push(Span::raw(" │ "));
        } else if let Some(status) = &self.app.status {
            let style = if status.is_error {
                self.theme.error_style()
            } else {
                self.theme.base_style()
            };
            spans.push(Span::styled(status.text.clone(), style));
            spans.push(Span::raw(" │ "));
        }

        let filter = &self.app.filter;
        if filter.is_active() {
            let mut parts = Vec::new();
            let selected = filter.selected_colors().len() + filter.selected_categories().len();
            if selected > 0 {
                parts.push(format!("{selected} selected"));
            }
            if filter.min_quantity() > 1 {
                parts.push(format!("qty ≥ {}", filter.min_quantity()));
            }
            for field in bv_core::SearchField::ALL {
                let text = filter.search(field);
                if !text.is_empty() {
                    parts.push(format!("{}~\"{text}\"", field.label().to_lowercase()));
                }
            }
            spans.push(Span::styled("Filter: ", self.theme.dimmed_style()));
            spans.push(Span::styled(parts.join(", "), self.theme.warning_style()));
            spans.push(Span::raw(" │ "));
        }

        spans.push(Span::styled(
            format!("{}/{} parts", self.app.card_count(), self.app.groups().len()),
            self.theme.dimmed_style(),
        ));

        Line::from(spans)
    }
}

impl Widget for &StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_line())
            .style(self.theme.status_bar_style)
            .render(area, buf);
    }
}
