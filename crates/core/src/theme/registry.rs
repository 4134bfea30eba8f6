//! Built-in theme registry.
//!
//! The registry is a fixed list of themes built once on first access.
//! Entries are never mutated; callers clone a theme to customize it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{
    Effects, FontFamilies, FontSizeScale, FontWeightScale, Layout, LineHeightScale, RadiusScale,
    ShadowScale, SpacingScale, StorefrontTheme, TextColors, ThemeCategory, ThemeColors,
    TransitionScale, Typography,
};

/// Id of the theme used when a storefront's theme cannot be found.
pub const DEFAULT_THEME_ID: &str = "modern-minimal";

static THEMES: LazyLock<Vec<StorefrontTheme>> = LazyLock::new(|| {
    vec![
        modern_minimal(),
        urban_modern(),
        classic_boutique(),
        bold_market(),
        elegant_noir(),
        playful_pop(),
        fresh_organic(),
    ]
});

/// All built-in themes in registry order.
#[must_use]
pub fn all() -> &'static [StorefrontTheme] {
    &THEMES
}

/// Look up a theme by id.
#[must_use]
pub fn get(id: &str) -> Option<&'static StorefrontTheme> {
    THEMES.iter().find(|theme| theme.id == id)
}

/// Themes belonging to a category, in registry order.
pub fn by_category(category: ThemeCategory) -> impl Iterator<Item = &'static StorefrontTheme> {
    THEMES.iter().filter(move |theme| theme.category == category)
}

/// The fallback theme.
///
/// # Panics
///
/// Never panics: the registry is a non-empty static list whose first entry
/// is the default theme.
#[must_use]
#[allow(clippy::indexing_slicing)]
pub fn default_theme() -> &'static StorefrontTheme {
    &THEMES[0]
}

/// Look up a theme, falling back to the default theme when it doesn't exist.
#[must_use]
pub fn resolve(id: &str) -> &'static StorefrontTheme {
    get(id).unwrap_or_else(|| {
        tracing::warn!(theme_id = %id, "Theme not found, using default theme");
        default_theme()
    })
}

// =============================================================================
// Theme Definitions
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn colors(
    primary: &str,
    secondary: &str,
    accent: &str,
    background: &str,
    surface: &str,
    text: [&str; 3],
    border: &str,
    shadow: &str,
) -> ThemeColors {
    let [text_primary, text_secondary, text_muted] = text;
    ThemeColors {
        primary: primary.into(),
        secondary: secondary.into(),
        accent: accent.into(),
        background: background.into(),
        surface: surface.into(),
        text: TextColors {
            primary: text_primary.into(),
            secondary: text_secondary.into(),
            muted: text_muted.into(),
        },
        border: border.into(),
        shadow: shadow.into(),
    }
}

fn typography(primary: &str, secondary: Option<&str>, heading: Option<&str>) -> Typography {
    Typography {
        font_family: FontFamilies {
            primary: primary.into(),
            secondary: secondary.map(Into::into),
            heading: heading.map(Into::into),
        },
        font_size: FontSizeScale::default(),
        font_weight: FontWeightScale::default(),
        line_height: LineHeightScale::default(),
    }
}

fn custom(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn modern_minimal() -> StorefrontTheme {
    StorefrontTheme {
        id: DEFAULT_THEME_ID.into(),
        name: "Modern Minimal".into(),
        category: ThemeCategory::Minimal,
        description: "Clean lines, generous whitespace and a neutral palette that lets products speak."
            .into(),
        colors: colors(
            "#111827",
            "#6b7280",
            "#3b82f6",
            "#ffffff",
            "#f9fafb",
            ["#111827", "#4b5563", "#9ca3af"],
            "#e5e7eb",
            "rgba(17, 24, 39, 0.08)",
        ),
        typography: typography("Inter, system-ui, sans-serif", None, None),
        spacing: SpacingScale::default(),
        layout: Layout::default(),
        effects: Effects::default(),
        custom_properties: BTreeMap::new(),
    }
}

fn urban_modern() -> StorefrontTheme {
    StorefrontTheme {
        id: "urban-modern".into(),
        name: "Urban Modern".into(),
        category: ThemeCategory::Modern,
        description: "Confident blues and violets with crisp geometric type.".into(),
        colors: colors(
            "#2563eb",
            "#7c3aed",
            "#f59e0b",
            "#ffffff",
            "#f1f5f9",
            ["#0f172a", "#334155", "#94a3b8"],
            "#cbd5e1",
            "rgba(37, 99, 235, 0.15)",
        ),
        typography: typography(
            "\"DM Sans\", system-ui, sans-serif",
            Some("\"Space Grotesk\", sans-serif"),
            None,
        ),
        spacing: SpacingScale::default(),
        layout: Layout {
            max_width: "1280px".into(),
            border_radius: RadiusScale {
                md: "0.5rem".into(),
                lg: "0.75rem".into(),
                xl: "1rem".into(),
                ..RadiusScale::default()
            },
            ..Layout::default()
        },
        effects: Effects::default(),
        custom_properties: custom(&[("gradient-hero", "linear-gradient(135deg, #2563eb, #7c3aed)")]),
    }
}

fn classic_boutique() -> StorefrontTheme {
    StorefrontTheme {
        id: "classic-boutique".into(),
        name: "Classic Boutique".into(),
        category: ThemeCategory::Classic,
        description: "Warm paper tones and serif headings for heritage brands.".into(),
        colors: colors(
            "#7c2d12",
            "#a16207",
            "#047857",
            "#fffbf5",
            "#f5efe6",
            ["#292524", "#57534e", "#a8a29e"],
            "#e7e5e4",
            "rgba(68, 64, 60, 0.12)",
        ),
        typography: Typography {
            line_height: LineHeightScale {
                normal: "1.6".into(),
                relaxed: "1.85".into(),
                ..LineHeightScale::default()
            },
            ..typography(
                "Georgia, \"Times New Roman\", serif",
                Some("\"Source Sans 3\", sans-serif"),
                Some("\"Playfair Display\", Georgia, serif"),
            )
        },
        spacing: SpacingScale::default(),
        layout: Layout {
            max_width: "1140px".into(),
            border_radius: RadiusScale {
                sm: "0.125rem".into(),
                md: "0.25rem".into(),
                lg: "0.25rem".into(),
                xl: "0.5rem".into(),
                ..RadiusScale::default()
            },
            ..Layout::default()
        },
        effects: Effects {
            transition: TransitionScale {
                fast: "200ms ease".into(),
                normal: "300ms ease".into(),
                slow: "500ms ease".into(),
            },
            ..Effects::default()
        },
        custom_properties: custom(&[("ornament-color", "#d6c7b0")]),
    }
}

fn bold_market() -> StorefrontTheme {
    StorefrontTheme {
        id: "bold-market".into(),
        name: "Bold Market".into(),
        category: ThemeCategory::Bold,
        description: "High contrast, square corners and oversized type for loud brands.".into(),
        colors: colors(
            "#dc2626",
            "#111111",
            "#facc15",
            "#ffffff",
            "#fef2f2",
            ["#111111", "#262626", "#737373"],
            "#111111",
            "rgba(17, 17, 17, 0.9)",
        ),
        typography: Typography {
            font_size: FontSizeScale {
                xxl: "1.75rem".into(),
                xxxl: "2.5rem".into(),
                xxxxl: "3.5rem".into(),
                ..FontSizeScale::default()
            },
            font_weight: FontWeightScale {
                normal: "500".into(),
                bold: "900".into(),
                ..FontWeightScale::default()
            },
            ..typography(
                "\"Work Sans\", Arial, sans-serif",
                None,
                Some("\"Archivo Black\", Impact, sans-serif"),
            )
        },
        spacing: SpacingScale::default(),
        layout: Layout {
            border_radius: RadiusScale {
                sm: "0".into(),
                md: "0".into(),
                lg: "0".into(),
                xl: "0".into(),
                ..RadiusScale::default()
            },
            ..Layout::default()
        },
        effects: Effects {
            box_shadow: ShadowScale {
                sm: "2px 2px 0 0 #111111".into(),
                md: "4px 4px 0 0 #111111".into(),
                lg: "6px 6px 0 0 #111111".into(),
                xl: "10px 10px 0 0 #111111".into(),
            },
            ..Effects::default()
        },
        custom_properties: custom(&[("--stripe-width", "6px")]),
    }
}

fn elegant_noir() -> StorefrontTheme {
    StorefrontTheme {
        id: "elegant-noir".into(),
        name: "Elegant Noir".into(),
        category: ThemeCategory::Elegant,
        description: "Deep charcoal with gold accents for luxury goods.".into(),
        colors: colors(
            "#d4af37",
            "#a3a3a3",
            "#f5e6b8",
            "#0f0f0f",
            "#1a1a1a",
            ["#fafafa", "#d4d4d4", "#8a8a8a"],
            "#2e2e2e",
            "rgba(0, 0, 0, 0.6)",
        ),
        typography: Typography {
            font_weight: FontWeightScale {
                normal: "300".into(),
                medium: "400".into(),
                ..FontWeightScale::default()
            },
            ..typography(
                "\"Cormorant Garamond\", Georgia, serif",
                Some("Lato, \"Helvetica Neue\", sans-serif"),
                None,
            )
        },
        spacing: SpacingScale {
            lg: "2rem".into(),
            xl: "3rem".into(),
            xxl: "4.5rem".into(),
            ..SpacingScale::default()
        },
        layout: Layout {
            max_width: "1320px".into(),
            container_padding: "1.5rem".into(),
            ..Layout::default()
        },
        effects: Effects {
            transition: TransitionScale {
                fast: "200ms cubic-bezier(0.4, 0, 0.2, 1)".into(),
                normal: "350ms cubic-bezier(0.4, 0, 0.2, 1)".into(),
                slow: "600ms cubic-bezier(0.4, 0, 0.2, 1)".into(),
            },
            ..Effects::default()
        },
        custom_properties: custom(&[("gold-sheen", "linear-gradient(90deg, #b8860b, #f5e6b8, #b8860b)")]),
    }
}

fn playful_pop() -> StorefrontTheme {
    StorefrontTheme {
        id: "playful-pop".into(),
        name: "Playful Pop".into(),
        category: ThemeCategory::Playful,
        description: "Candy colors, rounded shapes and bouncy motion.".into(),
        colors: colors(
            "#ec4899",
            "#8b5cf6",
            "#22d3ee",
            "#fffaf0",
            "#fdf2f8",
            ["#3b0764", "#6b21a8", "#a78bfa"],
            "#fbcfe8",
            "rgba(236, 72, 153, 0.2)",
        ),
        typography: typography(
            "Nunito, \"Segoe UI\", sans-serif",
            None,
            Some("\"Fredoka\", Nunito, sans-serif"),
        ),
        spacing: SpacingScale::default(),
        layout: Layout {
            border_radius: RadiusScale {
                sm: "0.5rem".into(),
                md: "1rem".into(),
                lg: "1.5rem".into(),
                xl: "2rem".into(),
                ..RadiusScale::default()
            },
            ..Layout::default()
        },
        effects: Effects {
            transition: TransitionScale {
                fast: "150ms cubic-bezier(0.34, 1.56, 0.64, 1)".into(),
                normal: "300ms cubic-bezier(0.34, 1.56, 0.64, 1)".into(),
                slow: "500ms cubic-bezier(0.34, 1.56, 0.64, 1)".into(),
            },
            ..Effects::default()
        },
        custom_properties: BTreeMap::new(),
    }
}

fn fresh_organic() -> StorefrontTheme {
    StorefrontTheme {
        id: "fresh-organic".into(),
        name: "Fresh Organic".into(),
        category: ThemeCategory::Modern,
        description: "Leafy greens and soft neutrals for food and wellness shops.".into(),
        colors: colors(
            "#15803d",
            "#65a30d",
            "#ea580c",
            "#fbfdf8",
            "#f0f7ec",
            ["#1c2e1f", "#3f5a44", "#8aa38f"],
            "#d9e8d3",
            "rgba(21, 128, 61, 0.12)",
        ),
        typography: typography(
            "\"Nunito Sans\", system-ui, sans-serif",
            Some("\"Merriweather\", Georgia, serif"),
            None,
        ),
        spacing: SpacingScale::default(),
        layout: Layout {
            border_radius: RadiusScale {
                md: "0.625rem".into(),
                lg: "1rem".into(),
                xl: "1.25rem".into(),
                ..RadiusScale::default()
            },
            ..Layout::default()
        },
        effects: Effects::default(),
        custom_properties: custom(&[("leaf-pattern-opacity", "0.08")]),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|theme| theme.id.as_str()).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_default_theme_is_first() {
        assert_eq!(default_theme().id, DEFAULT_THEME_ID);
        assert_eq!(get(DEFAULT_THEME_ID), Some(default_theme()));
    }

    #[test]
    fn test_every_category_has_a_theme() {
        for category in ThemeCategory::ALL {
            assert!(
                by_category(category).next().is_some(),
                "no theme for {category}"
            );
        }
    }

    #[test]
    fn test_get_unknown_theme() {
        assert!(get("vaporwave").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(resolve("vaporwave").id, DEFAULT_THEME_ID);
        assert_eq!(resolve("bold-market").id, "bold-market");
    }

    #[test]
    fn test_themes_round_trip_through_json() {
        for theme in all() {
            let json = serde_json::to_string(theme).unwrap();
            let parsed: StorefrontTheme = serde_json::from_str(&json).unwrap();
            assert_eq!(&parsed, theme);
        }
    }
}
