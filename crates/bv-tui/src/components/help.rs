//! Help panel component.
//!
//! Displays a modal overlay with key bindings.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table, Widget};

use crate::theme::Theme;

/// Key binding definition for the help panel.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
    mode: &'static str,
}

const fn binding(key: &'static str, description: &'static str, mode: &'static str) -> KeyBinding {
    KeyBinding {
        key,
        description,
        mode,
    }
}

/// Static list of key bindings to display.
const KEY_BINDINGS: &[KeyBinding] = &[
    // Navigation
    binding("j / ↓", "Next item", "Browse/Set"),
    binding("k / ↑", "Previous item", "Browse/Set"),
    binding("g / G", "First / last item", "Browse"),
    binding("PgDn / PgUp", "Page down / up", "Browse"),
    binding("Tab / S-Tab", "Focus gallery, colors, categories", "Browse"),
    // Filtering
    binding("c / t / /", "Search color / category / part", "Browse"),
    binding("Tab", "Next search box", "Search"),
    binding("Enter / Esc", "Stop typing", "Search"),
    binding("Space / Enter", "Toggle highlighted option", "Browse"),
    binding("+ / -", "Raise / lower minimum quantity", "Browse"),
    binding("x / Esc", "Clear all filters", "Browse"),
    // Sets
    binding("s", "Choose a set", "Browse"),
    binding("Enter", "Load typed or highlighted set", "Set"),
    binding("r", "Reload set", "Browse"),
    // Application
    binding("?", "Toggle help panel", "Browse"),
    binding("q / Ctrl+c", "Quit", "Any"),
];

/// A help panel overlay widget.
pub struct HelpPanel<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPanel<'a> {
    /// Creates a new help panel.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn build_rows(&self) -> Vec<Row<'static>> {
        KEY_BINDINGS
            .iter()
            .map(|binding| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        binding.key,
                        self.theme.accent_style().add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(Span::styled(binding.description, self.theme.base_style())),
                    Cell::from(Span::styled(binding.mode, self.theme.dimmed_style())),
                ])
            })
            .collect()
    }
}

impl Widget for &HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(" Help - Key Bindings ", self.theme.header_style))
            .style(Style::default().bg(self.theme.overlay_bg));

        let heading = self
            .theme
            .accent_style()
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let header = Row::new(vec![
            Cell::from(Span::styled("Key", heading)),
            Cell::from(Span::styled("Action", heading)),
            Cell::from(Span::styled("Mode", heading)),
        ])
        .bottom_margin(1);

        let widths = [
            Constraint::Length(15),
            Constraint::Min(25),
            Constraint::Length(12),
        ];

        Table::new(self.build_rows(), widths)
            .block(block)
            .header(header)
            .render(area, buf);
    }
}
