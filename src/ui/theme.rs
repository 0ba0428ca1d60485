use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_secondary: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::rose_pine_dawn()
    }
}

impl Theme {
    /// Resolve a theme by its configured name, falling back to the default.
    ///
    pub fn from_name(name: &str) -> Theme {
        match name {
            "tokyo-night" => Theme::tokyo_night(),
            _ => Theme::rose_pine_dawn(),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec {
                r: 161,
                g: 119,
                b: 255,
            }, // Purple
            accent: ColorSpec {
                r: 255,
                g: 109,
                b: 146,
            }, // Pink
            text: ColorSpec {
                r: 88,
                g: 82,
                b: 96,
            }, // Text
            text_secondary: ColorSpec {
                r: 121,
                g: 117,
                b: 147,
            }, // Subtext
            text_muted: ColorSpec {
                r: 152,
                g: 147,
                b: 165,
            }, // Muted
            success: ColorSpec {
                r: 59,
                g: 247,
                b: 209,
            }, // Green
            warning: ColorSpec {
                r: 246,
                g: 193,
                b: 119,
            }, // Gold
            error: ColorSpec {
                r: 235,
                g: 111,
                b: 146,
            }, // Love
            info: ColorSpec {
                r: 86,
                g: 148,
                b: 159,
            }, // Pine
            border_active: ColorSpec {
                r: 161,
                g: 119,
                b: 255,
            }, // Purple
            border_normal: ColorSpec {
                r: 206,
                g: 202,
                b: 205,
            }, // Highlight Med
            highlight_bg: ColorSpec {
                r: 244,
                g: 237,
                b: 232,
            }, // Overlay
            highlight_fg: ColorSpec {
                r: 87,
                g: 82,
                b: 121,
            }, // Foam
        }
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec {
                r: 122,
                g: 162,
                b: 247,
            }, // Blue
            accent: ColorSpec {
                r: 187,
                g: 154,
                b: 247,
            }, // Purple
            text: ColorSpec {
                r: 192,
                g: 202,
                b: 245,
            }, // Foreground
            text_secondary: ColorSpec {
                r: 169,
                g: 177,
                b: 214,
            }, // Editor fg
            text_muted: ColorSpec {
                r: 86,
                g: 95,
                b: 137,
            }, // Comment
            success: ColorSpec {
                r: 158,
                g: 206,
                b: 106,
            }, // Green
            warning: ColorSpec {
                r: 224,
                g: 175,
                b: 104,
            }, // Orange
            error: ColorSpec {
                r: 247,
                g: 118,
                b: 142,
            }, // Red
            info: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Cyan
            border_active: ColorSpec {
                r: 122,
                g: 162,
                b: 247,
            }, // Blue
            border_normal: ColorSpec {
                r: 59,
                g: 66,
                b: 97,
            }, // Dark border
            highlight_bg: ColorSpec {
                r: 41,
                g: 46,
                b: 66,
            }, // Selection
            highlight_fg: ColorSpec {
                r: 192,
                g: 202,
                b: 245,
            }, // Foreground
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_resolves_known_themes() {
        assert_eq!(Theme::from_name("tokyo-night").name, "tokyo-night");
        assert_eq!(Theme::from_name("rose-pine-dawn").name, "rose-pine-dawn");
    }

    #[test]
    fn test_from_name_falls_back_to_default() {
        assert_eq!(Theme::from_name("no-such-theme").name, Theme::default().name);
    }

    #[test]
    fn test_color_spec_to_color() {
        let spec = ColorSpec { r: 1, g: 2, b: 3 };
        assert_eq!(spec.to_color(), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_theme_serializes() {
        let theme = Theme::default();
        let yaml = serde_yaml::to_string(&theme).expect("theme should serialize");
        let back: Theme = serde_yaml::from_str(&yaml).expect("theme should deserialize");
        assert_eq!(back.name, theme.name);
    }
}
