//! Theme and styling for the TUI.
//!
//! # Example
//!
//! ```
//! use bv_tui::Theme;
//!
//! let theme = Theme::dark();
//! let swatch = theme.swatch_style("Dark Red");
//! ```

use bv_core::ColorScheme;
use ratatui::style::{Color, Modifier, Style};

/// Colors and styles used throughout the interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // =========================================================================
    // Selection Colors
    // =========================================================================
    /// Background color for the cursor row.
    pub selected_bg: Color,

    /// Foreground color for the cursor row.
    pub selected_fg: Color,

    /// Foreground color for a checked picker option.
    pub checked_fg: Color,

    // =========================================================================
    // Base Colors
    // =========================================================================
    /// Primary foreground color.
    pub fg: Color,

    /// Primary background color.
    pub bg: Color,

    /// Dimmed/secondary text color.
    pub dimmed_fg: Color,

    /// Accent color for highlights.
    pub accent: Color,

    /// Quantity badge color.
    pub quantity_fg: Color,

    /// Warning color (truncated inventory).
    pub warning_fg: Color,

    /// Error color.
    pub error_fg: Color,

    /// Background for modal overlays.
    pub overlay_bg: Color,

    // =========================================================================
    // Border Styles
    // =========================================================================
    /// Style for normal borders.
    pub border_style: Style,

    /// Style for focused borders.
    pub focused_border_style: Style,

    // =========================================================================
    // Component Styles
    // =========================================================================
    /// Style for highlighted/selected items.
    pub highlight_style: Style,

    /// Style for the header bar.
    pub header_style: Style,

    /// Style for the status bar.
    pub status_bar_style: Style,
}

impl Theme {
    /// Creates a dark theme (light text on dark background).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            checked_fg: Color::Rgb(100, 255, 100),

            fg: Color::Rgb(220, 220, 220),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(255, 207, 0), // brick yellow
            quantity_fg: Color::Rgb(100, 150, 255),
            warning_fg: Color::Rgb(255, 200, 100),
            error_fg: Color::Rgb(255, 80, 80),
            overlay_bg: Color::Rgb(25, 25, 35),

            border_style: Style::default().fg(Color::Rgb(80, 80, 100)),
            focused_border_style: Style::default().fg(Color::Rgb(255, 207, 0)),

            highlight_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 80))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(255, 207, 0))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .bg(Color::Rgb(40, 40, 50)),
        }
    }

    /// Creates a light theme (dark text on light background).
    #[must_use]
    pub fn light() -> Self {
        Self {
            selected_bg: Color::Rgb(200, 200, 220),
            selected_fg: Color::Black,
            checked_fg: Color::Rgb(50, 150, 50),

            fg: Color::Rgb(30, 30, 30),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(200, 30, 30), // brick red
            quantity_fg: Color::Rgb(50, 100, 200),
            warning_fg: Color::Rgb(180, 130, 50),
            error_fg: Color::Rgb(180, 50, 50),
            overlay_bg: Color::Rgb(235, 235, 240),

            border_style: Style::default().fg(Color::Rgb(150, 150, 170)),
            focused_border_style: Style::default().fg(Color::Rgb(200, 30, 30)),

            highlight_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(200, 200, 220))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(200, 30, 30))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(60, 60, 60))
                .bg(Color::Rgb(220, 220, 230)),
        }
    }

    /// Creates a theme from a [`ColorScheme`] configuration.
    ///
    /// [`ColorScheme::Auto`] uses the dark theme.
    #[must_use]
    pub fn from_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark | ColorScheme::Auto | _ => Self::dark(),
        }
    }

    /// Returns the swatch color for a catalog color name.
    ///
    /// Only the common solid colors are mapped; anything else (including
    /// transparent and metallic colors) uses the dimmed color.
    #[must_use]
    pub fn swatch(&self, color_name: &str) -> Color {
        let name = color_name.to_ascii_lowercase();
        match name.as_str() {
            "black" => Color::Rgb(27, 42, 52),
            "white" => Color::Rgb(244, 244, 244),
            "red" => Color::Rgb(201, 26, 9),
            "dark red" => Color::Rgb(114, 14, 15),
            "blue" => Color::Rgb(0, 85, 191),
            "dark blue" => Color::Rgb(10, 52, 99),
            "yellow" => Color::Rgb(242, 205, 55),
            "green" => Color::Rgb(35, 120, 65),
            "dark green" => Color::Rgb(24, 70, 50),
            "orange" => Color::Rgb(254, 138, 24),
            "tan" => Color::Rgb(228, 205, 158),
            "dark tan" => Color::Rgb(149, 138, 115),
            "brown" | "reddish brown" => Color::Rgb(88, 42, 18),
            "light bluish gray" => Color::Rgb(160, 165, 169),
            "dark bluish gray" => Color::Rgb(108, 110, 104),
            "pearl gold" => Color::Rgb(170, 127, 46),
            _ => self.dimmed_fg,
        }
    }

    /// Returns a style that paints the swatch color.
    #[must_use]
    pub fn swatch_style(&self, color_name: &str) -> Style {
        Style::default().fg(self.swatch(color_name))
    }

    /// Returns a style with the base foreground color.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Returns a style for dimmed/secondary text.
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed_fg)
    }

    /// Returns a style for accent/highlighted text.
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns a style for checked picker options.
    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default().fg(self.checked_fg)
    }

    /// Returns a style for quantities.
    #[must_use]
    pub fn quantity_style(&self) -> Style {
        Style::default()
            .fg(self.quantity_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Returns a style for warnings.
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning_fg)
    }

    /// Returns a style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }

    /// Returns the border style for a panel.
    #[must_use]
    pub const fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border_style
        } else {
            self.border_style
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_scheme() {
        assert_eq!(Theme::from_scheme(ColorScheme::Dark), Theme::dark());
        assert_eq!(Theme::from_scheme(ColorScheme::Light), Theme::light());
        assert_eq!(Theme::from_scheme(ColorScheme::Auto), Theme::dark());
    }

    #[test]
    fn test_swatch_is_case_insensitive() {
        let theme = Theme::dark();
        assert_eq!(theme.swatch("Red"), theme.swatch("RED"));
        assert_ne!(theme.swatch("Red"), theme.dimmed_fg);
    }

    #[test]
    fn test_unknown_swatch_is_dimmed() {
        let theme = Theme::light();
        assert_eq!(theme.swatch("Trans-Neon Green"), theme.dimmed_fg);
    }

    #[test]
    fn test_border_follows_focus() {
        let theme = Theme::dark();
        assert_eq!(theme.border(true), theme.focused_border_style);
        assert_eq!(theme.border(false), theme.border_style);
    }

    #[test]
    fn test_theme_default() {
        assert_eq!(Theme::default(), Theme::dark());
    }
}
