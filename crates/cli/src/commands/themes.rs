//! Theme registry commands.

use std::fmt::Write;

use shopfront_core::ThemeCategory;
use shopfront_core::theme::{generate_scoped_theme_css, registry};

use super::CliError;

/// List built-in themes, one per line: id, category, name.
pub fn list(category: Option<ThemeCategory>) -> String {
    let themes = registry::all()
        .iter()
        .filter(|theme| category.is_none_or(|c| theme.category == c));

    let mut out = String::new();
    for theme in themes {
        let marker = if theme.id == registry::DEFAULT_THEME_ID {
            " (default)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<18} {:<8} {}{marker}",
            theme.id,
            theme.category.as_str(),
            theme.name
        );
    }
    tracing::debug!(lines = out.lines().count(), "Listed themes");
    out
}

/// Print a theme's CSS custom properties under `selector`.
pub fn css(id: &str, selector: &str) -> Result<String, CliError> {
    let theme = registry::get(id).ok_or_else(|| CliError::UnknownTheme(id.to_owned()))?;

    let selector = selector.trim();
    if selector.is_empty() || selector.contains(['{', '}', ';']) {
        return Err(CliError::InvalidSelector(selector.to_owned()));
    }

    Ok(generate_scoped_theme_css(theme, selector))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_includes_every_theme() {
        let out = list(None);
        assert_eq!(out.lines().count(), registry::all().len());
        assert!(out.contains("modern-minimal"));
        assert!(out.contains("(default)"));
    }

    #[test]
    fn test_list_filters_by_category() {
        let out = list(Some(ThemeCategory::Bold));
        assert!(!out.is_empty());
        assert!(out.lines().all(|line| line.contains(" bold ")));
    }

    #[test]
    fn test_css_scopes_to_selector() {
        let out = css("modern-minimal", ".theme-preview").unwrap();
        assert!(out.starts_with(".theme-preview {"));
        assert!(out.contains("--theme-primary:"));
    }

    #[test]
    fn test_css_unknown_theme() {
        assert!(matches!(
            css("no-such-theme", ":root"),
            Err(CliError::UnknownTheme(id)) if id == "no-such-theme"
        ));
    }

    #[test]
    fn test_css_rejects_breakout_selector() {
        assert!(matches!(
            css("modern-minimal", "body } * {"),
            Err(CliError::InvalidSelector(_))
        ));
    }
}
