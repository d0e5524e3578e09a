//! Theme definitions for isstrack
//!
//! Provides four built-in themes: Cosmic, Gruvbox, Nord, and Transparent.
//! Each theme defines colors for all UI elements.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Map colors
    pub map_land: Color,
    pub map_marker: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Cosmic => Self::cosmic(),
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Deep purple night-sky theme (default)
    pub fn cosmic() -> Self {
        Self {
            // Base
            bg: Color::Rgb(26, 22, 37),             // #1a1625
            fg: Color::Rgb(243, 244, 246),          // #f3f4f6
            fg_dim: Color::Rgb(139, 128, 160),      // #8b80a0

            // Accent (violet)
            accent: Color::Rgb(159, 122, 234),      // #9f7aea
            accent_dim: Color::Rgb(91, 54, 152),    // #5b3698

            // Status
            success: Color::Rgb(134, 239, 172),     // #86efac
            error: Color::Rgb(239, 68, 68),         // #ef4444

            // UI elements
            border: Color::Rgb(74, 74, 106),        // #4a4a6a
            border_focused: Color::Rgb(139, 92, 246), // #8b5cf6
            selection_bg: Color::Rgb(45, 36, 56),   // #2d2438
            selection_fg: Color::Rgb(233, 213, 255), // #e9d5ff

            // Map
            map_land: Color::Rgb(221, 214, 254),    // #ddd6fe
            map_marker: Color::Rgb(139, 92, 246),   // #8b5cf6
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            // Base
            bg: Color::Rgb(40, 40, 40),           // #282828
            fg: Color::Rgb(235, 219, 178),        // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116),    // #928374

            // Accent (orange)
            accent: Color::Rgb(254, 128, 25),     // #fe8019
            accent_dim: Color::Rgb(214, 93, 14),  // #d65d0e

            // Status
            success: Color::Rgb(184, 187, 38),    // #b8bb26
            error: Color::Rgb(251, 73, 52),       // #fb4934

            // UI elements
            border: Color::Rgb(80, 73, 69),       // #504945
            border_focused: Color::Rgb(168, 153, 132), // #a89984
            selection_bg: Color::Rgb(80, 73, 69), // #504945
            selection_fg: Color::Rgb(235, 219, 178), // #ebdbb2

            // Map
            map_land: Color::Rgb(131, 165, 152),  // #83a598
            map_marker: Color::Rgb(254, 128, 25), // #fe8019
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            // Base (Polar Night)
            bg: Color::Rgb(46, 52, 64),           // #2e3440
            fg: Color::Rgb(236, 239, 244),        // #eceff4
            fg_dim: Color::Rgb(76, 86, 106),      // #4c566a

            // Accent (Frost - blue)
            accent: Color::Rgb(136, 192, 208),    // #88c0d0
            accent_dim: Color::Rgb(94, 129, 172), // #5e81ac

            // Status (Aurora)
            success: Color::Rgb(163, 190, 140),   // #a3be8c (green)
            error: Color::Rgb(191, 97, 106),      // #bf616a (red)

            // UI elements
            border: Color::Rgb(59, 66, 82),       // #3b4252
            border_focused: Color::Rgb(136, 192, 208), // #88c0d0
            selection_bg: Color::Rgb(76, 86, 106),    // #4c566a
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4

            // Map
            map_land: Color::Rgb(129, 161, 193),  // #81a1c1
            map_marker: Color::Rgb(235, 203, 139), // #ebcb8b
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            // Base - use terminal defaults
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            // Accent
            accent: Color::Cyan,
            accent_dim: Color::Blue,

            // Status
            success: Color::Green,
            error: Color::Red,

            // UI elements
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            // Map
            map_land: Color::Green,
            map_marker: Color::Magenta,
        }
    }

    // Style helpers for common UI patterns

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// ISS marker on the map
    pub fn marker(&self) -> Style {
        Style::default()
            .fg(self.map_marker)
            .add_modifier(Modifier::BOLD)
    }

    /// Icon next to an info row
    pub fn icon(&self) -> Style {
        Style::default().fg(self.accent_dim).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let cosmic = Theme::from_name(ThemeName::Cosmic);
        assert_eq!(cosmic.bg, Color::Rgb(26, 22, 37));

        let gruvbox = Theme::from_name(ThemeName::Gruvbox);
        assert_eq!(gruvbox.bg, Color::Rgb(40, 40, 40));

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert_eq!(transparent.bg, Color::Reset);
    }
}
