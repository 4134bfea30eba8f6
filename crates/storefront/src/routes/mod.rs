//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                             - Redirect to the theme gallery
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (backend reachable)
//!
//! # Themes
//! GET  /themes                       - Theme gallery (?category=)
//! GET  /themes/{id}                  - Theme preview on a demo store
//! GET  /themes/{id}/theme.css        - Generated theme CSS
//!
//! # Storefronts
//! GET  /s/{slug}                     - Storefront page (modules)
//! GET  /s/{slug}/theme.css           - Storefront theme CSS
//! GET  /s/{slug}/products            - Product listing (?q= &sort= &category= &page=)
//! GET  /s/{slug}/products/{id}       - Product detail
//! POST /s/{slug}/contact             - Contact form (rate limited, HTMX fragment)
//! POST /s/{slug}/newsletter          - Newsletter signup (rate limited, HTMX fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /s/{slug}/cart                - Cart page
//! POST /s/{slug}/cart/add            - Add item (returns count badge, triggers cart-updated)
//! POST /s/{slug}/cart/remove         - Remove item (returns cart_items fragment)
//! GET  /s/{slug}/cart/count          - Cart count badge
//!
//! # Search
//! GET  /search                       - Cross-store product search (?q= &page=)
//!
//! # Theme editor
//! GET  /manage/{slug}/theme          - Editor page
//! GET  /manage/{slug}/theme/draft.css - Draft CSS scoped to the preview
//! POST /manage/{slug}/theme/field    - Set one field
//! POST /manage/{slug}/theme/select   - Switch base theme
//! POST /manage/{slug}/theme/reset    - Discard draft changes
//! POST /manage/{slug}/theme/save     - Save the draft to the backend
//! ```

pub mod cart;
pub mod contact;
pub mod health;
pub mod manage;
pub mod newsletter;
pub mod products;
pub mod search;
pub mod storefront;
pub mod themes;

use axum::{
    Router,
    http::HeaderMap,
    response::Redirect,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer};

use crate::middleware::form_rate_limiter;
use crate::state::AppState;

/// Create the theme gallery routes router.
pub fn theme_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(themes::index))
        .route("/{id}", get(themes::preview))
        .route("/{id}/theme.css", get(themes::stylesheet))
}

/// Create the storefront routes router, nested under `/s/{slug}`.
pub fn storefront_routes() -> Router<AppState> {
    // Form posts get their own rate limit
    let forms = Router::new()
        .route("/contact", post(contact::submit))
        .route("/newsletter", post(newsletter::subscribe))
        .layer(form_rate_limiter());

    Router::new()
        .route("/", get(storefront::show))
        .route("/theme.css", get(storefront::stylesheet))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .merge(forms)
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the theme editor routes router, nested under `/manage/{slug}/theme`.
pub fn manage_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(manage::editor))
        .route("/draft.css", get(manage::draft_stylesheet))
        .route("/field", post(manage::set_field))
        .route("/select", post(manage::select_theme))
        .route("/reset", post(manage::reset))
        .route("/save", post(manage::save))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/themes") }))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/search", get(search::search))
        .nest("/themes", theme_routes())
        .nest("/s/{slug}", storefront_routes())
        .nest("/manage/{slug}/theme", manage_routes())
}

/// Whether the request was made by HTMX.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some_and(|v| v == "true")
}

/// Basic email validation.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Deserialize empty query values as `None`.
///
/// Browsers submit empty fields as `?page=`, which would otherwise fail to
/// parse.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@shop.example.com"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
    }
}
