//! Shopfront storefront library.
//!
//! This crate provides the storefront server as a library, allowing the
//! router to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod modules;
pub mod routes;
pub mod sample;
pub mod state;
pub mod views;

use axum::{Router, middleware::from_fn};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the application router with its middleware stack.
///
/// See [`middleware`] for the layer order.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::csp_nonce_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use shopfront_core::theme::REQUIRED_VARIABLES;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{BackendConfig, StorefrontConfig};

    /// App wired to a backend that is never contacted.
    fn test_app() -> Router {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            backend: BackendConfig {
                base_url: url::Url::parse("http://127.0.0.1:9/").unwrap(),
                api_token: SecretString::from("unit_test_backend_token"),
                cache_ttl: Duration::from_secs(60),
            },
            products_per_page: 12,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        app(AppState::new(config).unwrap())
    }

    async fn get(uri: &str) -> axum::response::Response {
        test_app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_sets_security_headers() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn test_theme_stylesheet_route() {
        let response = get("/themes/bold-market/theme.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["cache-control"], "public, max-age=3600");
    }

    #[tokio::test]
    async fn test_static_stylesheet_is_served() {
        let response = get("/static/css/main.css").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(get("/no/such/page").await.status(), StatusCode::NOT_FOUND);
    }

    fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect_files(&path, out);
            } else {
                out.push(path);
            }
        }
    }

    fn theme_variables(source: &str) -> Vec<String> {
        source
            .match_indices("var(--theme-")
            .map(|(start, _)| {
                let name = &source[start + 4..];
                let end = name
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                    .unwrap_or(name.len());
                name[..end].to_string()
            })
            .collect()
    }

    #[test]
    fn test_stylesheets_and_templates_use_known_theme_variables() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let mut files = Vec::new();
        collect_files(&root.join("static/css"), &mut files);
        collect_files(&root.join("templates"), &mut files);

        let mut checked = 0;
        for file in files {
            let source = fs::read_to_string(&file).unwrap();
            for name in theme_variables(&source) {
                assert!(
                    REQUIRED_VARIABLES.contains(&name.as_str()),
                    "{} uses unknown variable {name}",
                    file.display()
                );
                checked += 1;
            }
        }
        assert!(checked > 0);
    }
}
