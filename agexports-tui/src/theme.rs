//! Harvest theme tokens for the AgExports TUI
//!
//! Provides a consistent color palette:
//! - **Background**: Deep soil brown-black (base layer)
//! - **Accent**: Wheat gold (focus, active chips, cursor)
//! - **Selection**: Orange (selected states, same as the map border color)
//! - **Highlight**: White (emphasized pie sectors)
//! - **Warning**: Amber (ignored clicks, missing data)
//! - **Muted**: Slate (hints, secondary text)

use agexports_core::color::Rgb;
use ratatui::style::{Color, Modifier, Style};

/// Harvest theme for the AgExports TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Deep soil background (primary surface)
    pub background: Color,
    /// Wheat gold accent (focus, highlights)
    pub accent: Color,
    /// Orange (selected states)
    pub selection: Color,
    /// White (emphasized sectors)
    pub highlight: Color,
    /// Amber (warnings)
    pub warning: Color,
    /// Slate (muted text, empty tiles)
    pub muted: Color,
    /// Primary text
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::harvest()
    }
}

impl Theme {
    pub fn harvest() -> Self {
        Self {
            background: Color::Rgb(24, 20, 16),
            accent: Color::Rgb(245, 197, 66),
            selection: to_color(Rgb::ORANGE),
            highlight: Color::White,
            warning: Color::Rgb(255, 176, 0),
            muted: Color::Rgb(120, 130, 145),
            text_primary: Color::Rgb(235, 235, 225),
        }
    }

    /// Border color for a map region.
    pub fn region_border(&self, emphasized: bool) -> Color {
        if emphasized {
            self.selection
        } else {
            self.muted
        }
    }
}

/// Convert a core color to a terminal color.
pub fn to_color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_u8();
    Color::Rgb(r, g, b)
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_fg(background: Rgb) -> Color {
    let luma = 0.299 * background.r + 0.587 * background.g + 0.114 * background.b;
    if luma > 140.0 {
        Color::Black
    } else {
        Color::White
    }
}

// ── Style shortcuts used by the panels ──────────────────────────────

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn selection() -> Style {
    Style::default()
        .fg(Theme::default().selection)
        .add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text_primary)
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.accent, Color::Rgb(245, 197, 66));
        assert_eq!(theme.selection, Color::Rgb(255, 165, 0));
    }

    #[test]
    fn test_region_border() {
        let theme = Theme::default();
        assert_eq!(theme.region_border(true), theme.selection);
        assert_eq!(theme.region_border(false), theme.muted);
    }

    #[test]
    fn test_contrast_fg() {
        assert_eq!(contrast_fg(Rgb::new(247.0, 251.0, 255.0)), Color::Black);
        assert_eq!(contrast_fg(Rgb::new(8.0, 48.0, 107.0)), Color::White);
    }

    #[test]
    fn test_to_color_rounds() {
        assert_eq!(to_color(Rgb::new(10.4, 10.6, 255.9)), Color::Rgb(10, 11, 255));
    }
}
