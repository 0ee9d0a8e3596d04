//! Color palette and style tokens for the StockFlow dashboard.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (focus, highlights)
//! - **Positive**: neon green (success, saved files)
//! - **Negative**: hot pink (failures)
//! - **Warning**: neon orange (empty results, refused actions)
//! - **Neutral**: cool purple (section headings)
//! - **Muted**: steel blue (hints, secondary text)

use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusLevel;

/// Parrot/neon theme for the StockFlow dashboard
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (fetched data, saved files, up days)
    pub positive: Color,
    /// Hot pink (fetch and export failures, down days)
    pub negative: Color,
    /// Neon orange (empty results, refused actions)
    pub warning: Color,
    /// Cool purple (section headings)
    pub neutral: Color,
    /// Steel blue (muted text, key hints)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text, incomplete rows)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    /// Create the default Parrot/neon theme
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Color for a day's move: close at or above open is up.
    pub fn change_color(&self, open: Option<f64>, close: Option<f64>) -> Color {
        match (open, close) {
            (Some(o), Some(c)) if c >= o => self.positive,
            (Some(_), Some(_)) => self.negative,
            _ => self.text_secondary,
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

/// Base style for the whole frame: primary text on the background color.
pub fn base() -> Style {
    Style::default().fg(THEME.text_primary).bg(THEME.background)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

/// Style for a status bar message.
pub fn status(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => accent(),
        StatusLevel::Success => positive(),
        StatusLevel::Warning => warning(),
        StatusLevel::Error => negative(),
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
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
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_status_style() {
        let theme = Theme::default();
        assert_eq!(status(StatusLevel::Info).fg, Some(theme.accent));
        assert_eq!(status(StatusLevel::Success).fg, Some(theme.positive));
        assert_eq!(status(StatusLevel::Warning).fg, Some(theme.warning));
        assert_eq!(status(StatusLevel::Error), negative());
    }

    #[test]
    fn test_base_uses_background() {
        let theme = Theme::default();
        assert_eq!(base().bg, Some(theme.background));
        assert_eq!(base().fg, Some(theme.text_primary));
    }

    #[test]
    fn test_change_color() {
        let theme = Theme::default();
        assert_eq!(theme.change_color(Some(10.0), Some(11.0)), theme.positive);
        assert_eq!(theme.change_color(Some(10.0), Some(10.0)), theme.positive);
        assert_eq!(theme.change_color(Some(10.0), Some(9.0)), theme.negative);
        assert_eq!(theme.change_color(None, Some(9.0)), theme.text_secondary);
    }

    #[test]
    fn test_panel_styles() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
        assert_eq!(panel_title(true), accent_bold());
    }
}
