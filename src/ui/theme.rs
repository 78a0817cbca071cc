//! Color themes for the UI.

use crate::app::Theme;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background color.
    pub bg: Color,
    /// Raised background (input box, status bar).
    pub bg_alt: Color,
    /// Primary text color.
    pub text: Color,
    /// Heading text color.
    pub heading: Color,
    /// Label text color.
    pub label: Color,
    /// Value text color.
    pub value: Color,
    /// Border color.
    pub border: Color,
    /// Probe and crosshair color.
    pub accent: Color,
    /// Gaps and hints.
    pub muted: Color,
    /// Status bar foreground color.
    pub status_fg: Color,
    /// Warning color.
    pub warning: Color,
    /// Error color.
    pub error: Color,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self {
                bg: Color::Rgb(40, 40, 40),
                bg_alt: Color::Rgb(60, 56, 54),
                text: Color::Rgb(235, 219, 178),
                heading: Color::Rgb(251, 184, 108),
                label: Color::Rgb(184, 187, 38),
                value: Color::Rgb(142, 192, 124),
                border: Color::Rgb(102, 92, 84),
                accent: Color::Rgb(250, 189, 47),
                muted: Color::Rgb(146, 131, 116),
                status_fg: Color::Rgb(235, 219, 178),
                warning: Color::Rgb(254, 128, 25),
                error: Color::Rgb(251, 73, 52),
            },
            Theme::GruvboxLight => Self {
                bg: Color::Rgb(251, 245, 234),
                bg_alt: Color::Rgb(235, 219, 178),
                text: Color::Rgb(60, 56, 54),
                heading: Color::Rgb(175, 58, 3),
                label: Color::Rgb(121, 116, 14),
                value: Color::Rgb(102, 123, 3),
                border: Color::Rgb(213, 196, 161),
                accent: Color::Rgb(181, 118, 20),
                muted: Color::Rgb(146, 131, 116),
                status_fg: Color::Rgb(60, 56, 54),
                warning: Color::Rgb(175, 58, 3),
                error: Color::Rgb(157, 0, 6),
            },
        }
    }
}
