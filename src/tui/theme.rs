// Color themes for the console
//
// Two built-in themes, picked by name in the config file. The struct maps
// colors to UI concepts rather than widgets, so a view never hardcodes a
// color and the light theme stays readable everywhere.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Built-in theme choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Resolve a config value. Unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Semantic color assignments for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_type: BorderType,

    pub title: Color,
    pub status_bar: Color,
    pub highlight: Color,
    pub muted: Color,

    // Table selection
    pub selection: Color,
    pub selection_fg: Color,

    // Entity status tiers (reservation states, report badges, toasts)
    pub ok: Color,
    pub warn: Color,
    pub danger: Color,
    pub info: Color,

    // Log level tints for the logs panel
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,

    // Dashboard chart
    pub chart: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            border: Color::Gray,
            border_type: BorderType::Rounded,

            title: Color::Cyan,
            status_bar: Color::Gray,
            highlight: Color::Yellow,
            muted: Color::DarkGray,

            selection: Color::DarkGray,
            selection_fg: Color::Yellow,

            ok: Color::Green,
            warn: Color::Yellow,
            danger: Color::Red,
            info: Color::Blue,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,

            chart: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            border: Color::DarkGray,
            border_type: BorderType::Rounded,

            title: Color::Blue,
            status_bar: Color::DarkGray,
            highlight: Color::Rgb(184, 134, 11),
            muted: Color::Gray,

            selection: Color::LightBlue,
            selection_fg: Color::Black,

            ok: Color::Green,
            warn: Color::Rgb(184, 134, 11),
            danger: Color::Red,
            info: Color::Blue,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,

            chart: Color::Blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_resolve_case_insensitively() {
        assert_eq!(ThemeKind::from_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name(" Light "), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("dark"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Dark);
    }
}
