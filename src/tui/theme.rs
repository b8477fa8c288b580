//! Colour themes
//!
//! The dark-mode preference picks one of two palettes; every view styles
//! itself through the palette rather than naming colours directly.

use ratatui::style::{Color, Modifier, Style};

use crate::config::Appearance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub heading: Color,
    pub amount: Color,
    pub danger: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        background: Color::White,
        text: Color::Black,
        muted: Color::DarkGray,
        accent: Color::Blue,
        heading: Color::Magenta,
        amount: Color::Red,
        danger: Color::Red,
        selection_bg: Color::Blue,
        selection_fg: Color::White,
    };

    pub const DARK: Theme = Theme {
        background: Color::Black,
        text: Color::White,
        muted: Color::Gray,
        accent: Color::Cyan,
        heading: Color::Yellow,
        amount: Color::LightRed,
        danger: Color::LightRed,
        selection_bg: Color::Cyan,
        selection_fg: Color::Black,
    };

    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::LIGHT,
            Appearance::Dark => Self::DARK,
        }
    }

    /// Base style for the whole screen
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    pub fn amount(&self) -> Style {
        Style::default().fg(self.amount)
    }

    pub fn danger(&self) -> Style {
        Style::default().fg(self.danger)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_follows_appearance() {
        assert_eq!(Theme::for_appearance(Appearance::Dark), Theme::DARK);
        assert_eq!(Theme::for_appearance(Appearance::Light), Theme::LIGHT);
        assert_ne!(Theme::DARK.background, Theme::LIGHT.background);
    }
}
