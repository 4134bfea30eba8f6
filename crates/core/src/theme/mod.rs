//! Storefront theme model.
//!
//! A theme is an immutable bundle of design tokens: colors, typography,
//! spacing, layout and effects, plus an open-ended map of extra custom CSS
//! properties. Every token is a CSS value string so that it can be emitted
//! as-is by [`css::generate_theme_css`].
//!
//! Customization never mutates a registry entry. The [`ThemeEditor`] works
//! on its own copy and hands a new record back to the caller.

pub mod css;
pub mod editor;
pub mod registry;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use css::{REQUIRED_VARIABLES, generate_scoped_theme_css, generate_theme_css};
pub use editor::{EditorError, ThemeEditor};

/// Theme category used to group themes in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Minimal,
    Modern,
    Classic,
    Bold,
    Elegant,
    Playful,
}

impl ThemeCategory {
    /// Every category, in gallery order.
    pub const ALL: [Self; 6] = [
        Self::Minimal,
        Self::Modern,
        Self::Classic,
        Self::Bold,
        Self::Elegant,
        Self::Playful,
    ];

    /// Machine name as used in query strings and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Bold => "bold",
            Self::Elegant => "elegant",
            Self::Playful => "playful",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Modern => "Modern",
            Self::Classic => "Classic",
            Self::Bold => "Bold",
            Self::Elegant => "Elegant",
            Self::Playful => "Playful",
        }
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("invalid theme category: {s}"))
    }
}

/// A complete storefront theme record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontTheme {
    pub id: String,
    pub name: String,
    pub category: ThemeCategory,
    pub description: String,
    pub colors: ThemeColors,
    pub typography: Typography,
    pub spacing: SpacingScale,
    pub layout: Layout,
    pub effects: Effects,
    /// Extra CSS custom properties, emitted after the standard tokens.
    #[serde(default)]
    pub custom_properties: BTreeMap<String, String>,
}

/// Color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: TextColors,
    pub border: String,
    pub shadow: String,
}

/// Text colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub muted: String,
}

/// Typography tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: FontFamilies,
    #[serde(default)]
    pub font_size: FontSizeScale,
    #[serde(default)]
    pub font_weight: FontWeightScale,
    #[serde(default)]
    pub line_height: LineHeightScale,
}

/// Font stacks. Missing secondary and heading fonts fall back to the primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamilies {
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
}

impl FontFamilies {
    /// Secondary font, or the primary font when unset.
    #[must_use]
    pub fn secondary_or_primary(&self) -> &str {
        self.secondary.as_deref().unwrap_or(&self.primary)
    }

    /// Heading font, falling back to the secondary and then the primary font.
    #[must_use]
    pub fn heading_or_fallback(&self) -> &str {
        self.heading
            .as_deref()
            .unwrap_or_else(|| self.secondary_or_primary())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizeScale {
    pub xs: String,
    pub sm: String,
    pub base: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xxl: String,
    #[serde(rename = "3xl")]
    pub xxxl: String,
    #[serde(rename = "4xl")]
    pub xxxxl: String,
}

impl Default for FontSizeScale {
    fn default() -> Self {
        Self {
            xs: "0.75rem".into(),
            sm: "0.875rem".into(),
            base: "1rem".into(),
            lg: "1.125rem".into(),
            xl: "1.25rem".into(),
            xxl: "1.5rem".into(),
            xxxl: "1.875rem".into(),
            xxxxl: "2.25rem".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontWeightScale {
    pub light: String,
    pub normal: String,
    pub medium: String,
    pub semibold: String,
    pub bold: String,
}

impl Default for FontWeightScale {
    fn default() -> Self {
        Self {
            light: "300".into(),
            normal: "400".into(),
            medium: "500".into(),
            semibold: "600".into(),
            bold: "700".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineHeightScale {
    pub tight: String,
    pub normal: String,
    pub relaxed: String,
}

impl Default for LineHeightScale {
    fn default() -> Self {
        Self {
            tight: "1.25".into(),
            normal: "1.5".into(),
            relaxed: "1.75".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingScale {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xxl: String,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            xs: "0.25rem".into(),
            sm: "0.5rem".into(),
            md: "1rem".into(),
            lg: "1.5rem".into(),
            xl: "2rem".into(),
            xxl: "3rem".into(),
        }
    }
}

/// Page layout tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    pub max_width: String,
    pub container_padding: String,
    pub border_radius: RadiusScale,
    pub breakpoints: Breakpoints,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            max_width: "1200px".into(),
            container_padding: "1rem".into(),
            border_radius: RadiusScale::default(),
            breakpoints: Breakpoints::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusScale {
    pub none: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    pub full: String,
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self {
            none: "0".into(),
            sm: "0.125rem".into(),
            md: "0.375rem".into(),
            lg: "0.5rem".into(),
            xl: "0.75rem".into(),
            full: "9999px".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            sm: "640px".into(),
            md: "768px".into(),
            lg: "1024px".into(),
            xl: "1280px".into(),
        }
    }
}

/// Visual effect tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effects {
    pub box_shadow: ShadowScale,
    pub blur: BlurScale,
    pub transition: TransitionScale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowScale {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

impl Default for ShadowScale {
    fn default() -> Self {
        Self {
            sm: "0 1px 2px 0 rgba(0, 0, 0, 0.05)".into(),
            md: "0 4px 6px -1px rgba(0, 0, 0, 0.1)".into(),
            lg: "0 10px 15px -3px rgba(0, 0, 0, 0.1)".into(),
            xl: "0 20px 25px -5px rgba(0, 0, 0, 0.1)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurScale {
    pub sm: String,
    pub md: String,
    pub lg: String,
}

impl Default for BlurScale {
    fn default() -> Self {
        Self {
            sm: "4px".into(),
            md: "8px".into(),
            lg: "16px".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionScale {
    pub fast: String,
    pub normal: String,
    pub slow: String,
}

impl Default for TransitionScale {
    fn default() -> Self {
        Self {
            fast: "150ms ease-in-out".into(),
            normal: "250ms ease-in-out".into(),
            slow: "400ms ease-in-out".into(),
        }
    }
}
