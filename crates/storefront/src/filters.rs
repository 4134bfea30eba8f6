//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash of main.css, computed at build time.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Star rating out of five, e.g. `★★★★☆`.
///
/// Usage in templates: `{{ rating|stars }}`
#[askama::filter_fn]
pub fn stars(rating: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(star_string(&rating.to_string()))
}

fn star_string(rating: &str) -> String {
    let filled = rating.trim().parse::<usize>().unwrap_or(0).min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_clamps_to_five() {
        assert_eq!(star_string("4"), "★★★★☆");
        assert_eq!(star_string("9"), "★★★★★");
        assert_eq!(star_string("n/a"), "☆☆☆☆☆");
    }
}
