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
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_edit: ColorSpec,
    pub footer_list: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::new(125, 207, 255),       // Blue
            accent: ColorSpec::new(255, 159, 196),        // Magenta
            text: ColorSpec::new(169, 177, 214),          // Foreground
            text_muted: ColorSpec::new(117, 121, 148),    // Comment
            success: ColorSpec::new(158, 206, 106),       // Green
            warning: ColorSpec::new(255, 202, 40),        // Yellow
            error: ColorSpec::new(247, 118, 142),         // Red
            border_active: ColorSpec::new(125, 207, 255), // Blue
            border_normal: ColorSpec::new(117, 121, 148), // Comment
            highlight_bg: ColorSpec::new(125, 207, 255),  // Blue
            highlight_fg: ColorSpec::new(26, 27, 38),     // Background
            footer_edit: ColorSpec::new(255, 202, 40),    // Yellow
            footer_list: ColorSpec::new(125, 207, 255),   // Blue
            footer_normal: ColorSpec::new(0, 0, 0),       // Black
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::new(161, 119, 255),      // Purple
            accent: ColorSpec::new(255, 109, 146),       // Pink
            text: ColorSpec::new(88, 82, 96),            // Text
            text_muted: ColorSpec::new(152, 147, 165),   // Muted
            success: ColorSpec::new(59, 247, 209),       // Pine
            warning: ColorSpec::new(255, 210, 0),        // Gold
            error: ColorSpec::new(235, 111, 146),        // Love
            border_active: ColorSpec::new(161, 119, 255), // Purple
            border_normal: ColorSpec::new(88, 82, 96),   // Text
            highlight_bg: ColorSpec::new(61, 174, 233),  // Foam
            highlight_fg: ColorSpec::new(0, 0, 0),       // Black
            footer_edit: ColorSpec::new(255, 210, 0),    // Gold
            footer_list: ColorSpec::new(61, 174, 233),   // Foam
            footer_normal: ColorSpec::new(0, 0, 0),      // Black
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec!["tokyo-night".to_string(), "rose-pine-dawn".to_string()]
    }
}
