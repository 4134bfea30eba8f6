//! Integration test harness for Shopfront.
//!
//! Each test starts two servers on ephemeral ports:
//!
//! - a fake backend REST API (axum) holding storefronts, carts and form
//!   submissions in memory
//! - the real storefront app, configured to talk to the fake backend
//!
//! Tests then drive the storefront over HTTP with a cookie-keeping
//! `reqwest` client, the same way a browser (or HTMX) would.
//!
//! ```rust,ignore
//! let ctx = TestContext::start().await;
//! let resp = ctx.get("/s/acme").await;
//! assert_eq!(resp.status(), 200);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod fixtures;

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, Response, redirect};
use secrecy::SecretString;
use shopfront_storefront::{
    app,
    config::{BackendConfig, StorefrontConfig},
    state::AppState,
};
use tokio::net::TcpListener;

pub use backend::FakeBackend;

/// Bearer token shared by the storefront and the fake backend.
pub const API_TOKEN: &str = "it-9f2c71d4e8a3b605";

/// A running storefront wired to a fake backend.
pub struct TestContext {
    pub backend: FakeBackend,
    pub base_url: String,
    pub client: Client,
}

impl TestContext {
    /// Start with the default fixture stores.
    pub async fn start() -> Self {
        Self::with_backend(FakeBackend::with_fixtures()).await
    }

    /// Start against a prepared fake backend.
    pub async fn with_backend(backend: FakeBackend) -> Self {
        let backend_addr = serve(backend.router()).await;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind storefront listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let base_url = format!("http://{addr}");

        let state = AppState::new(config(addr, backend_addr, &base_url))
            .expect("Failed to build storefront state");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app(state).into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Storefront server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            backend,
            base_url,
            client,
        }
    }

    /// Absolute URL of a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Plain GET.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET as HTMX would send it.
    pub async fn htmx_get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("HX-Request", "true")
            .send()
            .await
            .expect("HTMX GET request failed")
    }

    /// Form POST as HTMX would send it.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .header("X-Forwarded-For", "203.0.113.7")
            .form(form)
            .send()
            .await
            .expect("HTMX POST request failed")
    }

    /// Plain form POST (no JavaScript).
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("X-Forwarded-For", "203.0.113.7")
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Read a response body.
pub async fn text(response: Response) -> String {
    response.text().await.expect("Failed to read body")
}

fn config(addr: SocketAddr, backend_addr: SocketAddr, base_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: addr.ip(),
        port: addr.port(),
        base_url: base_url.to_string(),
        backend: BackendConfig {
            base_url: url::Url::parse(&format!("http://{backend_addr}/"))
                .expect("Backend address is a valid URL"),
            api_token: SecretString::from(API_TOKEN.to_string()),
            cache_ttl: Duration::from_secs(60),
        },
        products_per_page: 4,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

async fn serve(router: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind backend listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake backend failed");
    });
    addr
}
