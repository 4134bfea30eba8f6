//! Theme gallery and preview handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shopfront_core::{
    StorefrontTheme, ThemeCategory,
    theme::{generate_scoped_theme_css, generate_theme_css, registry},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::modules::{ModuleContext, RenderedLayout, render_layout};
use crate::sample::sample_storefront;
use crate::views::{FilterOption, StoreView};

/// Registry themes change only with a deploy.
const REGISTRY_CSS_CACHE: &str = "public, max-age=3600";

/// Theme card display data.
#[derive(Debug, Clone)]
pub struct ThemeCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: &'static str,
    /// Class scoping the theme's variables to the card.
    pub scope_class: String,
    pub href: String,
}

impl From<&StorefrontTheme> for ThemeCard {
    fn from(theme: &StorefrontTheme) -> Self {
        Self {
            id: theme.id.clone(),
            name: theme.name.clone(),
            description: theme.description.clone(),
            category: theme.category.label(),
            scope_class: scope_class(&theme.id),
            href: format!("/themes/{}", urlencoding::encode(&theme.id)),
        }
    }
}

fn scope_class(theme_id: &str) -> String {
    format!("theme-scope-{theme_id}")
}

/// Gallery query parameters.
#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub category: Option<ThemeCategory>,
}

/// Theme gallery template.
#[derive(Template, WebTemplate)]
#[template(path = "themes/index.html")]
pub struct ThemeGalleryTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub themes: Vec<ThemeCard>,
    pub categories: Vec<FilterOption>,
}

/// Theme preview template.
#[derive(Template, WebTemplate)]
#[template(path = "themes/preview.html")]
pub struct ThemePreviewTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub theme: ThemeCard,
    pub store: StoreView,
    pub layout: RenderedLayout,
}

/// Display the theme gallery.
///
/// Every card gets the variables of its own theme through a scoped rule, so
/// one page shows all palettes side by side.
#[instrument(skip(nonce))]
pub async fn index(
    Query(query): Query<GalleryQuery>,
    CspNonce(nonce): CspNonce,
) -> ThemeGalleryTemplate {
    let themes: Vec<&StorefrontTheme> = match query.category {
        Some(category) => registry::by_category(category).collect(),
        None => registry::all().iter().collect(),
    };

    let mut theme_css = generate_theme_css(registry::default_theme());
    for theme in &themes {
        theme_css.push_str(&generate_scoped_theme_css(
            theme,
            &format!(".{}", scope_class(&theme.id)),
        ));
    }

    let mut categories = vec![FilterOption {
        value: String::new(),
        label: "All".to_string(),
        selected: query.category.is_none(),
    }];
    categories.extend(ThemeCategory::ALL.into_iter().map(|c| FilterOption {
        value: c.as_str().to_string(),
        label: c.label().to_string(),
        selected: query.category == Some(c),
    }));

    ThemeGalleryTemplate {
        nonce,
        theme_css,
        themes: themes.into_iter().map(ThemeCard::from).collect(),
        categories,
    }
}

fn find_theme(id: &str) -> Result<&'static StorefrontTheme> {
    registry::get(id).ok_or_else(|| AppError::NotFound("Theme".to_string()))
}

/// Preview a theme on the demo store.
#[instrument(skip(nonce))]
pub async fn preview(
    Path(id): Path<String>,
    CspNonce(nonce): CspNonce,
) -> Result<ThemePreviewTemplate> {
    let theme = find_theme(&id)?;
    let storefront = sample_storefront(&theme.id);

    // The demo store has no backend; keep its links inside the preview
    let base_path = format!("/themes/{}", urlencoding::encode(&theme.id));
    let ctx = ModuleContext {
        base_path: base_path.clone(),
        ..ModuleContext::new(&storefront)
    };
    let layout = render_layout(&storefront.customization.modules, &ctx)?;

    let mut store = StoreView::from(&storefront.store);
    store.base_path = base_path;

    Ok(ThemePreviewTemplate {
        nonce,
        theme_css: generate_theme_css(theme),
        theme: ThemeCard::from(theme),
        store,
        layout,
    })
}

/// Serve a registry theme as a stylesheet.
#[instrument]
pub async fn stylesheet(Path(id): Path<String>) -> Result<Response> {
    let theme = find_theme(&id)?;
    Ok(css_response(generate_theme_css(theme), REGISTRY_CSS_CACHE))
}

/// A `text/css` response with the given `Cache-Control`.
pub(crate) fn css_response(css: String, cache_control: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, cache_control),
        ],
        css,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gallery_scopes_every_theme() {
        let page = index(Query(GalleryQuery { category: None }), CspNonce("n".into())).await;
        assert_eq!(page.themes.len(), registry::all().len());
        for theme in registry::all() {
            assert!(page.theme_css.contains(&format!(".theme-scope-{} {{", theme.id)));
        }
        assert!(page.theme_css.starts_with(":root {"));
        assert!(page.categories.first().is_some_and(|c| c.selected));
    }

    #[tokio::test]
    async fn test_gallery_filters_by_category() {
        let page = index(
            Query(GalleryQuery {
                category: Some(ThemeCategory::Bold),
            }),
            CspNonce("n".into()),
        )
        .await;
        assert!(!page.themes.is_empty());
        assert!(page.themes.iter().all(|t| t.category == "Bold"));
        assert!(
            page.categories
                .iter()
                .any(|c| c.value == "bold" && c.selected)
        );
    }

    #[tokio::test]
    async fn test_preview_unknown_theme_is_not_found() {
        let result = preview(Path("nope".to_string()), CspNonce("n".into())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_preview_links_stay_in_preview() {
        let page = preview(Path("elegant-noir".to_string()), CspNonce("n".into()))
            .await
            .unwrap_or_else(|e| panic!("preview failed: {e}"));
        assert_eq!(page.store.base_path, "/themes/elegant-noir");
        assert!(page.theme_css.contains("--theme-primary"));
        assert!(!page.layout.is_empty());
    }

    #[tokio::test]
    async fn test_stylesheet_headers() {
        let response = stylesheet(Path("modern-minimal".to_string()))
            .await
            .unwrap_or_else(|e| panic!("stylesheet failed: {e}"));
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/css; charset=utf-8"[..])
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(REGISTRY_CSS_CACHE.as_bytes())
        );
    }
}
