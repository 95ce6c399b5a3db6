// Theme system for the TUI
//
// Two built-in palettes. Each theme defines colors for all UI elements.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Colors and border style used by every component
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub muted: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub border_type: BorderType,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(22, 24, 30),
            foreground: Color::Rgb(220, 223, 228),
            highlight: Color::Rgb(97, 175, 239),
            selection_bg: Color::Rgb(44, 49, 60),
            muted: Color::Rgb(110, 118, 129),
            success: Color::Rgb(152, 195, 121),
            error: Color::Rgb(224, 108, 117),
            warning: Color::Rgb(229, 192, 123),
            border_type: BorderType::Rounded,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            highlight: Color::Rgb(64, 120, 242),
            selection_bg: Color::Rgb(229, 229, 230),
            muted: Color::Rgb(160, 161, 167),
            success: Color::Rgb(80, 161, 79),
            error: Color::Rgb(228, 86, 73),
            warning: Color::Rgb(193, 132, 1),
            border_type: BorderType::Plain,
        }
    }

    /// Look up a theme by config name, falling back to dark
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
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
    fn test_from_name() {
        assert_eq!(Theme::from_name("Light").name, "light");
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("solarized").name, "dark");
    }
}
