//! Page rendering against the fake backend: theme gallery, storefront pages,
//! product browsing, cross-store search and error pages.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use shopfront_core::theme::registry;
use shopfront_integration_tests::{TestContext, text};

#[tokio::test]
async fn test_root_redirects_to_theme_gallery() {
    let ctx = TestContext::start().await;
    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/themes");
}

#[tokio::test]
async fn test_health_and_readiness() {
    let ctx = TestContext::start().await;
    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/health/ready").await.status(), StatusCode::OK);

    ctx.backend.set_unhealthy();
    assert_eq!(
        ctx.get("/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_theme_gallery_lists_every_theme() {
    let ctx = TestContext::start().await;
    let resp = ctx.get("/themes").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let csp = resp.headers()["content-security-policy"].to_str().unwrap().to_string();
    let body = text(resp).await;
    for theme in registry::all() {
        assert!(body.contains(&theme.name), "missing {}", theme.name);
        assert!(body.contains(&format!(".theme-scope-{} {{", theme.id)));
    }
    assert!(csp.contains("'nonce-"));
}

#[tokio::test]
async fn test_theme_gallery_filters_by_category() {
    let ctx = TestContext::start().await;
    let body = text(ctx.get("/themes?category=elegant").await).await;
    assert!(body.contains("Elegant Noir"));
    assert!(!body.contains("Playful Pop"));

    let resp = ctx.get("/themes?category=grunge").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_theme_preview_and_stylesheet() {
    let ctx = TestContext::start().await;

    let body = text(ctx.get("/themes/elegant-noir").await).await;
    assert!(body.contains("Elegant Noir"));
    assert!(body.contains("--theme-primary: #d4af37;"));

    let resp = ctx.get("/themes/elegant-noir/theme.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
    let css = text(resp).await;
    assert!(css.starts_with(":root {"));
    assert!(css.contains("--theme-background: #0f0f0f;"));

    assert_eq!(ctx.get("/themes/no-such-theme").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storefront_renders_visible_modules_in_order() {
    let ctx = TestContext::start().await;
    let resp = ctx.get("/s/acme").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = text(resp).await;

    // Theme variables are injected into the page head
    assert!(body.contains("--theme-primary: #d4af37;"));

    let announce = body.find("Free shipping over $50").unwrap();
    let hero = body.find("Welcome to Acme").unwrap();
    let featured = body.find("Staff picks").unwrap();
    assert!(announce < hero && hero < featured);

    // Footer modules render after the main flow
    let contact = body.find("Write to us").unwrap();
    assert!(contact > featured);
    assert!(body[contact..].contains("</footer>"));

    assert!(!body.contains("Secret Sale"));
    assert!(!body.contains("Mystery"));
}

#[tokio::test]
async fn test_storefront_without_modules_uses_default_theme() {
    let ctx = TestContext::start().await;
    let body = text(ctx.get("/s/bare").await).await;
    assert!(body.contains("Bare Store"));
    assert!(body.contains("This store is still setting up."));

    let css = text(ctx.get("/s/bare/theme.css").await).await;
    let default = registry::default_theme();
    assert!(css.contains(&format!("--theme-primary: {};", default.colors.primary)));
}

#[tokio::test]
async fn test_storefront_payload_is_cached() {
    let ctx = TestContext::start().await;
    ctx.get("/s/acme").await;
    ctx.get("/s/acme/products").await;
    ctx.get("/s/acme/theme.css").await;
    assert_eq!(ctx.backend.storefront_fetches("acme"), 1);
}

#[tokio::test]
async fn test_unknown_store_renders_error_page() {
    let ctx = TestContext::start().await;
    let resp = ctx.get("/s/nowhere").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = text(resp).await;
    assert!(body.contains("Try again"));
    assert!(body.contains("Back"));
}

#[tokio::test]
async fn test_browse_filters_sorts_and_paginates() {
    let ctx = TestContext::start().await;

    let body = text(ctx.get("/s/acme/products?q=lamp").await).await;
    assert!(body.contains("Brass Lamp"));
    assert!(!body.contains("Clay Vase"));

    let body = text(ctx.get("/s/acme/products?category=Lighting&sort=price-asc").await).await;
    let shade = body.find("Linen Shade").unwrap();
    let lamp = body.find("Brass Lamp").unwrap();
    assert!(shade < lamp);
    assert!(!body.contains("Soy Candle"));

    // Four per page in the test configuration
    let body = text(ctx.get("/s/acme/products").await).await;
    assert!(body.contains("5 products"));
    assert!(body.contains("page=2"));
    let body = text(ctx.get("/s/acme/products?page=2").await).await;
    assert!(body.contains("Page 2 of 2"));
}

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::start().await;

    let body = text(ctx.get("/s/acme/products/p-candle").await).await;
    assert!(body.contains("Soy Candle"));
    assert!(body.contains("$18.00"));
    assert!(body.contains("$24.00"));
    assert!(body.contains("/s/acme/cart/add"));

    let body = text(ctx.get("/s/acme/products/p-rug").await).await;
    assert!(body.contains("Sold out"));

    assert_eq!(
        ctx.get("/s/acme/products/p-missing").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_cross_store_search() {
    let ctx = TestContext::start().await;

    let body = text(ctx.get("/search").await).await;
    assert!(!body.contains("result-count"));

    let body = text(ctx.get("/search?q=vase").await).await;
    assert!(body.contains("1 result"));
    assert!(body.contains("/s/acme/products/p-vase"));

    let body = text(ctx.get("/search?q=nothing-matches").await).await;
    assert!(body.contains("Nothing found"));
}
