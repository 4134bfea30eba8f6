//! CSS custom property generation.
//!
//! Turns a [`StorefrontTheme`] into a block of `--theme-*` declarations.
//! The variable names are the contract between themes and every template
//! and stylesheet in the storefront; renaming one breaks every consumer.

use std::fmt::Write as _;

use super::{StorefrontTheme, registry};

/// Every variable emitted for the standard theme fields, in output order.
pub const REQUIRED_VARIABLES: &[&str] = &[
    "--theme-primary",
    "--theme-secondary",
    "--theme-accent",
    "--theme-background",
    "--theme-surface",
    "--theme-text-primary",
    "--theme-text-secondary",
    "--theme-text-muted",
    "--theme-border",
    "--theme-shadow-color",
    "--theme-font-primary",
    "--theme-font-secondary",
    "--theme-font-heading",
    "--theme-font-size-xs",
    "--theme-font-size-sm",
    "--theme-font-size-base",
    "--theme-font-size-lg",
    "--theme-font-size-xl",
    "--theme-font-size-2xl",
    "--theme-font-size-3xl",
    "--theme-font-size-4xl",
    "--theme-font-weight-light",
    "--theme-font-weight-normal",
    "--theme-font-weight-medium",
    "--theme-font-weight-semibold",
    "--theme-font-weight-bold",
    "--theme-line-height-tight",
    "--theme-line-height-normal",
    "--theme-line-height-relaxed",
    "--theme-spacing-xs",
    "--theme-spacing-sm",
    "--theme-spacing-md",
    "--theme-spacing-lg",
    "--theme-spacing-xl",
    "--theme-spacing-2xl",
    "--theme-max-width",
    "--theme-container-padding",
    "--theme-radius-none",
    "--theme-radius-sm",
    "--theme-radius-md",
    "--theme-radius-lg",
    "--theme-radius-xl",
    "--theme-radius-full",
    "--theme-breakpoint-sm",
    "--theme-breakpoint-md",
    "--theme-breakpoint-lg",
    "--theme-breakpoint-xl",
    "--theme-box-shadow-sm",
    "--theme-box-shadow-md",
    "--theme-box-shadow-lg",
    "--theme-box-shadow-xl",
    "--theme-blur-sm",
    "--theme-blur-md",
    "--theme-blur-lg",
    "--theme-transition-fast",
    "--theme-transition-normal",
    "--theme-transition-slow",
];

/// Prefix applied to custom property keys that don't start with `--`.
const CUSTOM_PREFIX: &str = "--theme-";

/// Generate the theme's CSS custom properties scoped to the document root.
///
/// Output is deterministic: the same theme always yields byte-identical CSS.
#[must_use]
pub fn generate_theme_css(theme: &StorefrontTheme) -> String {
    generate_scoped_theme_css(theme, ":root")
}

/// Generate the theme's CSS custom properties under an arbitrary selector.
///
/// Used where several themes share one page, e.g. the theme gallery.
#[must_use]
pub fn generate_scoped_theme_css(theme: &StorefrontTheme, selector: &str) -> String {
    let mut css = String::with_capacity(4096);
    let _ = writeln!(css, "{selector} {{");

    let defaults = theme_declarations(registry::default_theme());
    for ((name, value), (_, default)) in theme_declarations(theme).into_iter().zip(defaults) {
        let value = if is_safe_value(value) {
            value
        } else {
            tracing::warn!(theme = %theme.id, property = %name, "Using default theme value for unsafe CSS value");
            default
        };
        push_declaration(&mut css, &theme.id, name, value);
    }

    for (key, value) in &theme.custom_properties {
        let Some(name) = custom_property_name(key) else {
            tracing::warn!(theme = %theme.id, key = %key, "Skipping invalid custom property name");
            continue;
        };
        push_declaration(&mut css, &theme.id, &name, value);
    }

    css.push_str("}\n");
    css
}

/// The standard declarations of a theme, in [`REQUIRED_VARIABLES`] order.
#[must_use]
pub fn theme_declarations(theme: &StorefrontTheme) -> Vec<(&'static str, &str)> {
    let colors = &theme.colors;
    let fonts = &theme.typography.font_family;
    let size = &theme.typography.font_size;
    let weight = &theme.typography.font_weight;
    let line = &theme.typography.line_height;
    let spacing = &theme.spacing;
    let layout = &theme.layout;
    let radius = &layout.border_radius;
    let breakpoints = &layout.breakpoints;
    let effects = &theme.effects;

    vec![
        ("--theme-primary", colors.primary.as_str()),
        ("--theme-secondary", colors.secondary.as_str()),
        ("--theme-accent", colors.accent.as_str()),
        ("--theme-background", colors.background.as_str()),
        ("--theme-surface", colors.surface.as_str()),
        ("--theme-text-primary", colors.text.primary.as_str()),
        ("--theme-text-secondary", colors.text.secondary.as_str()),
        ("--theme-text-muted", colors.text.muted.as_str()),
        ("--theme-border", colors.border.as_str()),
        ("--theme-shadow-color", colors.shadow.as_str()),
        ("--theme-font-primary", fonts.primary.as_str()),
        ("--theme-font-secondary", fonts.secondary_or_primary()),
        ("--theme-font-heading", fonts.heading_or_fallback()),
        ("--theme-font-size-xs", size.xs.as_str()),
        ("--theme-font-size-sm", size.sm.as_str()),
        ("--theme-font-size-base", size.base.as_str()),
        ("--theme-font-size-lg", size.lg.as_str()),
        ("--theme-font-size-xl", size.xl.as_str()),
        ("--theme-font-size-2xl", size.xxl.as_str()),
        ("--theme-font-size-3xl", size.xxxl.as_str()),
        ("--theme-font-size-4xl", size.xxxxl.as_str()),
        ("--theme-font-weight-light", weight.light.as_str()),
        ("--theme-font-weight-normal", weight.normal.as_str()),
        ("--theme-font-weight-medium", weight.medium.as_str()),
        ("--theme-font-weight-semibold", weight.semibold.as_str()),
        ("--theme-font-weight-bold", weight.bold.as_str()),
        ("--theme-line-height-tight", line.tight.as_str()),
        ("--theme-line-height-normal", line.normal.as_str()),
        ("--theme-line-height-relaxed", line.relaxed.as_str()),
        ("--theme-spacing-xs", spacing.xs.as_str()),
        ("--theme-spacing-sm", spacing.sm.as_str()),
        ("--theme-spacing-md", spacing.md.as_str()),
        ("--theme-spacing-lg", spacing.lg.as_str()),
        ("--theme-spacing-xl", spacing.xl.as_str()),
        ("--theme-spacing-2xl", spacing.xxl.as_str()),
        ("--theme-max-width", layout.max_width.as_str()),
        ("--theme-container-padding", layout.container_padding.as_str()),
        ("--theme-radius-none", radius.none.as_str()),
        ("--theme-radius-sm", radius.sm.as_str()),
        ("--theme-radius-md", radius.md.as_str()),
        ("--theme-radius-lg", radius.lg.as_str()),
        ("--theme-radius-xl", radius.xl.as_str()),
        ("--theme-radius-full", radius.full.as_str()),
        ("--theme-breakpoint-sm", breakpoints.sm.as_str()),
        ("--theme-breakpoint-md", breakpoints.md.as_str()),
        ("--theme-breakpoint-lg", breakpoints.lg.as_str()),
        ("--theme-breakpoint-xl", breakpoints.xl.as_str()),
        ("--theme-box-shadow-sm", effects.box_shadow.sm.as_str()),
        ("--theme-box-shadow-md", effects.box_shadow.md.as_str()),
        ("--theme-box-shadow-lg", effects.box_shadow.lg.as_str()),
        ("--theme-box-shadow-xl", effects.box_shadow.xl.as_str()),
        ("--theme-blur-sm", effects.blur.sm.as_str()),
        ("--theme-blur-md", effects.blur.md.as_str()),
        ("--theme-blur-lg", effects.blur.lg.as_str()),
        ("--theme-transition-fast", effects.transition.fast.as_str()),
        ("--theme-transition-normal", effects.transition.normal.as_str()),
        ("--theme-transition-slow", effects.transition.slow.as_str()),
    ]
}

fn push_declaration(css: &mut String, theme_id: &str, name: &str, value: &str) {
    if !is_safe_value(value) {
        tracing::warn!(theme = %theme_id, property = %name, "Dropping unsafe CSS value");
        return;
    }
    let _ = writeln!(css, "  {name}: {};", value.trim());
}

/// Values end up inside a `<style>` element, so they must not be able to
/// close the declaration, the rule or the element, open a comment, or
/// start an escape sequence.
pub(crate) fn is_safe_value(value: &str) -> bool {
    !value.trim().is_empty()
        && !value.contains([';', '{', '}', '<', '>', '\\'])
        && !value.contains("/*")
        && !value.contains("*/")
}

/// Normalize a custom property key into a full `--name`.
fn custom_property_name(key: &str) -> Option<String> {
    let name = if key.starts_with("--") {
        key.to_string()
    } else {
        format!("{CUSTOM_PREFIX}{key}")
    };

    let body = name.get(2..)?;
    let valid = !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::theme::registry;

    fn declared_names(css: &str) -> Vec<&str> {
        css.lines()
            .filter_map(|line| line.trim().split_once(':'))
            .map(|(name, _)| name.trim())
            .filter(|name| name.starts_with("--"))
            .collect()
    }

    #[test]
    fn test_declarations_match_required_variables() {
        let theme = registry::default_theme();
        let names: Vec<&str> = theme_declarations(theme)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, REQUIRED_VARIABLES);
    }

    #[test]
    fn test_every_registry_theme_defines_every_variable() {
        for theme in registry::all() {
            let css = generate_theme_css(theme);
            let names = declared_names(&css);
            for required in REQUIRED_VARIABLES {
                assert!(
                    names.contains(required),
                    "theme {} is missing {required}",
                    theme.id
                );
            }
        }
    }

    #[test]
    fn test_output_is_structurally_valid_css() {
        for theme in registry::all() {
            let css = generate_theme_css(theme);
            assert!(css.starts_with(":root {\n"));
            assert!(css.ends_with("}\n"));
            assert_eq!(css.matches('{').count(), 1);
            assert_eq!(css.matches('}').count(), 1);

            let body: Vec<&str> = css.lines().skip(1).filter(|l| *l != "}").collect();
            for line in body {
                assert!(line.starts_with("  --"), "bad line {line:?}");
                assert!(line.ends_with(';'), "bad line {line:?}");
                assert_eq!(line.matches(';').count(), 1, "bad line {line:?}");
            }
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let theme = registry::get("elegant-noir").unwrap();
        assert_eq!(generate_theme_css(theme), generate_theme_css(&theme.clone()));
    }

    #[test]
    fn test_missing_secondary_font_falls_back_to_primary() {
        let mut theme = registry::default_theme().clone();
        theme.typography.font_family.secondary = None;
        theme.typography.font_family.heading = None;

        let css = generate_theme_css(&theme);
        let primary = &theme.typography.font_family.primary;
        assert!(css.contains(&format!("--theme-font-secondary: {primary};")));
        assert!(css.contains(&format!("--theme-font-heading: {primary};")));
    }

    #[test]
    fn test_custom_properties_are_appended_in_key_order() {
        let mut theme = registry::default_theme().clone();
        theme.custom_properties.clear();
        theme
            .custom_properties
            .insert("hero-overlay".to_string(), "rgba(0, 0, 0, 0.4)".to_string());
        theme
            .custom_properties
            .insert("--badge-color".to_string(), "#ff0066".to_string());

        let css = generate_theme_css(&theme);
        let badge = css.find("  --badge-color: #ff0066;").unwrap();
        let overlay = css.find("  --theme-hero-overlay: rgba(0, 0, 0, 0.4);").unwrap();
        let last_standard = css.find("--theme-transition-slow").unwrap();
        assert!(last_standard < badge);
        assert!(badge < overlay);
    }

    #[test]
    fn test_unsafe_values_and_names_are_dropped() {
        let mut theme = registry::get("elegant-noir").unwrap().clone();
        theme.colors.accent = "red; } body { display: none".to_string();
        theme
            .custom_properties
            .insert("bad name".to_string(), "1px".to_string());
        theme
            .custom_properties
            .insert("closer".to_string(), "</style><script>".to_string());

        let css = generate_theme_css(&theme);
        let fallback = &registry::default_theme().colors.accent;
        assert!(css.contains(&format!("  --theme-accent: {fallback};")));
        assert!(!css.contains("display: none"));
        assert!(!css.contains("bad name"));
        assert!(!css.contains("</style>"));
        assert_eq!(css.matches('}').count(), 1);
    }

    #[test]
    fn test_comment_and_escape_sequences_are_dropped() {
        let mut theme = registry::get("elegant-noir").unwrap().clone();
        theme.colors.primary = "#112233 /*".to_string();
        theme.colors.border = "*/ #000".to_string();
        theme
            .custom_properties
            .insert("glyph".to_string(), "\\3c".to_string());

        let css = generate_theme_css(&theme);
        assert!(!css.contains("/*"));
        assert!(!css.contains("*/"));
        assert!(!css.contains('\\'));
        assert!(!css.contains("--theme-glyph"));

        let names = declared_names(&css);
        for required in REQUIRED_VARIABLES {
            assert!(names.contains(required), "missing {required}");
        }
    }

    #[test]
    fn test_blank_standard_value_uses_default_theme_value() {
        let mut theme = registry::get("elegant-noir").unwrap().clone();
        theme.colors.primary = "   ".to_string();
        theme.spacing.md = String::new();

        let css = generate_theme_css(&theme);
        let defaults = registry::default_theme();
        assert!(css.contains(&format!("  --theme-primary: {};", defaults.colors.primary)));
        assert!(css.contains(&format!("  --theme-spacing-md: {};", defaults.spacing.md)));
    }

    #[test]
    fn test_scoped_selector() {
        let theme = registry::default_theme();
        let css = generate_scoped_theme_css(theme, "[data-theme=\"modern-minimal\"]");
        assert!(css.starts_with("[data-theme=\"modern-minimal\"] {\n"));
    }
}
