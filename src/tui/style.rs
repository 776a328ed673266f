//! Color themes and style mapping.
//!
//! Style classes come from the view layer; this module maps them to
//! concrete ratatui styles through the active theme. The theme is plain
//! state threaded through rendering, never a global.

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};

use crate::view::RowStyleClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggle(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }
}

/// Color palette resolved from a theme.
struct Palette {
    fg: Color,
    dim: Color,
    header_bg: Color,
    header_fg: Color,
    selected_bg: Color,
    active: Color,
    warning: Color,
    critical: Color,
    accent: Color,
}

const DARK: Palette = Palette {
    fg: Color::White,
    dim: Color::DarkGray,
    header_bg: Color::Blue,
    header_fg: Color::White,
    selected_bg: Color::DarkGray,
    active: Color::Green,
    warning: Color::Yellow,
    critical: Color::Red,
    accent: Color::Cyan,
};

const LIGHT: Palette = Palette {
    fg: Color::Black,
    dim: Color::Gray,
    header_bg: Color::Cyan,
    header_fg: Color::Black,
    selected_bg: Color::Gray,
    active: Color::Green,
    warning: Color::Rgb(160, 110, 0),
    critical: Color::Red,
    accent: Color::Blue,
};

/// Pre-defined styles for the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    theme: ThemeKind,
}

impl Styles {
    pub fn new(theme: ThemeKind) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &'static Palette {
        match self.theme {
            ThemeKind::Dark => &DARK,
            ThemeKind::Light => &LIGHT,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.palette().fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.palette().dim)
    }

    pub fn header(&self) -> Style {
        let p = self.palette();
        Style::default()
            .fg(p.header_fg)
            .bg(p.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header(&self) -> Style {
        self.header()
    }

    pub fn focused_row(&self) -> Style {
        Style::default()
            .bg(self.palette().selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.palette().critical)
            .add_modifier(Modifier::BOLD)
    }

    pub fn notice(&self) -> Style {
        Style::default().fg(self.palette().active)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.palette().accent)
    }

    pub fn sparkline(&self) -> Style {
        Style::default().fg(self.palette().accent)
    }

    /// Maps a view-layer style class to a concrete style.
    pub fn from_class(&self, class: RowStyleClass) -> Style {
        let p = self.palette();
        match class {
            RowStyleClass::Normal => Style::default().fg(p.fg),
            RowStyleClass::Warning => Style::default().fg(p.warning),
            RowStyleClass::Critical => Style::default().fg(p.critical),
            RowStyleClass::CriticalBold => {
                Style::default().fg(p.critical).add_modifier(Modifier::BOLD)
            }
            RowStyleClass::Active => Style::default().fg(p.active),
            RowStyleClass::Dimmed => Style::default().fg(p.dim),
            RowStyleClass::Accent => Style::default().fg(p.accent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggle_alternates() {
        assert_eq!(ThemeKind::Dark.toggle(), ThemeKind::Light);
        assert_eq!(ThemeKind::Dark.toggle().toggle(), ThemeKind::Dark);
    }

    #[test]
    fn class_mapping_differs_between_themes() {
        let dark = Styles::new(ThemeKind::Dark);
        let light = Styles::new(ThemeKind::Light);
        assert_ne!(
            dark.from_class(RowStyleClass::Normal),
            light.from_class(RowStyleClass::Normal)
        );
        // Critical stays red in both themes.
        assert_eq!(
            dark.from_class(RowStyleClass::Critical),
            light.from_class(RowStyleClass::Critical)
        );
    }
}
