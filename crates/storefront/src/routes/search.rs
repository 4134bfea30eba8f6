//! Cross-store product search.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use shopfront_core::theme::{generate_theme_css, registry};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;
use crate::views::{PageLinks, ProductView};

/// Search page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub page: Option<usize>,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub query: String,
    /// Whether a search was run (false for an empty query).
    pub searched: bool,
    pub results: Vec<ProductView>,
    pub total: usize,
    pub links: Option<PageLinks>,
}

fn search_href(query: &str, page: usize) -> String {
    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    qs.append_pair("q", query).append_pair("page", &page.to_string());
    format!("/search?{}", qs.finish())
}

/// Search products across all storefronts.
///
/// Pagination happens on the backend; an empty query shows the form only.
#[instrument(skip(state, nonce))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<SearchTemplate> {
    let q = query.q.trim().to_string();
    let theme_css = generate_theme_css(registry::default_theme());

    if q.is_empty() {
        return Ok(SearchTemplate {
            nonce,
            theme_css,
            query: q,
            searched: false,
            results: Vec::new(),
            total: 0,
            links: None,
        });
    }

    let page = state
        .backend()
        .search_products(
            &q,
            query.page.unwrap_or(1).max(1),
            state.config().products_per_page,
        )
        .await?;
    tracing::debug!(total = page.total, "Search completed");

    let links = PageLinks::new(&page, |n| search_href(&q, n));
    Ok(SearchTemplate {
        nonce,
        theme_css,
        searched: true,
        results: page.items.iter().map(ProductView::search_result).collect(),
        total: page.total,
        links: Some(links),
        query: q,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_href_encodes_query() {
        assert_eq!(search_href("oak & pine", 2), "/search?q=oak+%26+pine&page=2");
    }
}
