//! Theme selection for the code view.
//!
//! A `ThemeChoice` is what the user picked; a `Theme` is the resolved
//! colour record. `ThemeChoice::Default` follows the system appearance, so
//! resolving it needs the current `ColorScheme`.

use codeview_diagnostics::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Color representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Formats as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// System appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl FromStr for ColorScheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(CoreError::UnknownTheme(s.to_string())),
        }
    }
}

/// The theme picker's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Follow the system appearance
    #[default]
    Default,
    Light,
    Dark,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 3] = [ThemeChoice::Default, ThemeChoice::Light, ThemeChoice::Dark];

    /// Returns the scheme this choice stands for, if it doesn't follow the system.
    pub fn scheme(&self) -> Option<ColorScheme> {
        match self {
            ThemeChoice::Default => None,
            ThemeChoice::Light => Some(ColorScheme::Light),
            ThemeChoice::Dark => Some(ColorScheme::Dark),
        }
    }

    /// Resolves the choice against the system appearance.
    pub fn resolve(&self, system: ColorScheme) -> Theme {
        match self.scheme().unwrap_or(system) {
            ColorScheme::Light => Theme::default_light(),
            ColorScheme::Dark => Theme::default_dark(),
        }
    }
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeChoice::Default => "Default",
            ThemeChoice::Light => "Light",
            ThemeChoice::Dark => "Dark",
        })
    }
}

impl FromStr for ThemeChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "system" => Ok(ThemeChoice::Default),
            "light" => Ok(ThemeChoice::Light),
            "dark" => Ok(ThemeChoice::Dark),
            _ => Err(CoreError::UnknownTheme(s.to_string())),
        }
    }
}

/// Code view colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub is_dark: bool,
    pub background: Color,
    pub text: Color,
    pub cursor: Color,
    pub selection: Color,
    pub line_numbers: Color,
    pub minimap_background: Color,
    pub messages: MessageColors,
}

/// Background colours of message annotations, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageColors {
    pub live: Color,
    pub error: Color,
    pub warning: Color,
    pub informational: Color,
}

impl Theme {
    pub fn default_dark() -> Self {
        Self {
            name: "Default Dark".to_string(),
            is_dark: true,
            background: Color::rgb(0.12, 0.12, 0.14),
            text: Color::rgb(0.87, 0.87, 0.87),
            cursor: Color::rgb(0.85, 0.85, 0.85),
            selection: Color::rgba(0.25, 0.42, 0.75, 0.6),
            line_numbers: Color::rgb(0.45, 0.45, 0.48),
            minimap_background: Color::rgb(0.10, 0.10, 0.12),
            messages: MessageColors {
                live: Color::rgb(0.55, 0.55, 0.55),
                error: Color::rgb(0.84, 0.28, 0.26),
                warning: Color::rgb(0.87, 0.68, 0.22),
                informational: Color::rgb(0.40, 0.55, 0.85),
            },
        }
    }

    pub fn default_light() -> Self {
        Self {
            name: "Default Light".to_string(),
            is_dark: false,
            background: Color::rgb(1.0, 1.0, 1.0),
            text: Color::rgb(0.12, 0.12, 0.12),
            cursor: Color::rgb(0.0, 0.0, 0.0),
            selection: Color::rgba(0.70, 0.82, 1.0, 0.8),
            line_numbers: Color::rgb(0.60, 0.60, 0.62),
            minimap_background: Color::rgb(0.96, 0.96, 0.96),
            messages: MessageColors {
                live: Color::rgb(0.75, 0.75, 0.75),
                error: Color::rgb(0.95, 0.55, 0.52),
                warning: Color::rgb(0.98, 0.82, 0.45),
                informational: Color::rgb(0.62, 0.74, 0.96),
            },
        }
    }

    /// Returns the annotation colour for a message category.
    pub fn message_color(&self, category: Category) -> Color {
        match category {
            Category::Live => self.messages.live,
            Category::Error => self.messages.error,
            Category::Warning => self.messages.warning,
            Category::Informational => self.messages.informational,
        }
    }
}
