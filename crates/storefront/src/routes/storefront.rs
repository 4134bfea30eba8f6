//! Storefront page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Response,
};
use shopfront_core::theme::generate_theme_css;
use tracing::instrument;

use super::themes::css_response;
use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::modules::{ModuleContext, RenderedLayout, render_layout};
use crate::state::AppState;
use crate::views::StoreView;

/// Matches the backend client's storefront cache TTL.
const STOREFRONT_CSS_CACHE: &str = "public, max-age=60";

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "storefront/show.html")]
pub struct StorefrontTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub store: StoreView,
    pub layout: RenderedLayout,
}

/// Display a storefront: its modules, styled with its theme.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CspNonce(nonce): CspNonce,
) -> Result<StorefrontTemplate> {
    let storefront = state.backend().storefront(&slug).await?;
    let layout = render_layout(
        &storefront.customization.modules,
        &ModuleContext::new(&storefront),
    )?;

    tracing::debug!(
        main = layout.main.len(),
        footer = layout.footer.len(),
        theme = %storefront.theme().id,
        "Rendered storefront"
    );

    Ok(StorefrontTemplate {
        nonce,
        theme_css: generate_theme_css(storefront.theme()),
        store: StoreView::from(&storefront.store),
        layout,
    })
}

/// Serve a storefront's theme as a stylesheet.
#[instrument(skip(state))]
pub async fn stylesheet(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let storefront = state.backend().storefront(&slug).await?;
    Ok(css_response(
        generate_theme_css(storefront.theme()),
        STOREFRONT_CSS_CACHE,
    ))
}
