//! HTTP client for the backend REST API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shopfront_core::{Page, Product, PublicStorefront, StorefrontTheme};
use tracing::{debug, instrument};
use url::Url;

use super::{
    AddCartItemRequest, BackendError, Cart, ContactSubmission, CreateCartRequest,
    NewsletterSignup,
};
use crate::config::BackendConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_CAPACITY: u64 = 1000;

/// Client for the backend REST API.
///
/// Cheap to clone. Storefront payloads are cached per slug.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: SecretString,
    storefronts: Cache<String, Arc<PublicStorefront>>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let storefronts = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
                api_token: config.api_token.clone(),
                storefronts,
            }),
        })
    }

    // =========================================================================
    // Storefront Methods
    // =========================================================================

    /// Get a storefront by slug.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` for unknown slugs, or an error if the
    /// request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn storefront(&self, slug: &str) -> Result<Arc<PublicStorefront>, BackendError> {
        if let Some(storefront) = self.inner.storefronts.get(slug).await {
            debug!("Cache hit for storefront");
            return Ok(storefront);
        }

        let request = self.request(Method::GET, &storefront_path(slug, ""))?;
        let storefront: PublicStorefront = send_json(request).await?;
        let storefront = Arc::new(storefront);

        self.inner
            .storefronts
            .insert(slug.to_string(), Arc::clone(&storefront))
            .await;

        Ok(storefront)
    }

    /// Drop the cached payload of a storefront.
    pub async fn invalidate_storefront(&self, slug: &str) {
        self.inner.storefronts.invalidate(slug).await;
    }

    /// Persist a customized theme for a storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, theme), fields(slug = %slug, theme = %theme.id))]
    pub async fn save_theme(&self, slug: &str, theme: &StorefrontTheme) -> Result<(), BackendError> {
        let request = self
            .request(Method::PUT, &storefront_path(slug, "/theme"))?
            .json(theme);
        send_empty(request).await?;
        self.invalidate_storefront(slug).await;
        Ok(())
    }

    /// Forward a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, submission), fields(slug = %slug))]
    pub async fn submit_contact(
        &self,
        slug: &str,
        submission: &ContactSubmission,
    ) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, &storefront_path(slug, "/contact"))?
            .json(submission);
        send_empty(request).await
    }

    /// Sign an email up for a storefront's newsletter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, signup), fields(slug = %slug))]
    pub async fn subscribe_newsletter(
        &self,
        slug: &str,
        signup: &NewsletterSignup,
    ) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, &storefront_path(slug, "/newsletter"))?
            .json(signup);
        send_empty(request).await
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search products across all storefronts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &str,
        page: usize,
        limit: usize,
    ) -> Result<Page<Product>, BackendError> {
        let mut url = self.inner.base_url.join("search/products")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let request = self.authorized(self.inner.client.get(url));
        send_json(request).await
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Create an empty cart for a storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn create_cart(&self, slug: &str) -> Result<Cart, BackendError> {
        let request = self
            .request(Method::POST, "carts")?
            .json(&CreateCartRequest { storefront: slug });
        send_json(request).await
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the cart expired, or an error if
    /// the request fails.
    #[instrument(skip(self))]
    pub async fn cart(&self, cart_id: &str) -> Result<Cart, BackendError> {
        let request = self.request(Method::GET, &cart_path(cart_id, ""))?;
        send_json(request).await
    }

    /// Add a product to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn add_cart_item(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, BackendError> {
        let request = self
            .request(Method::POST, &cart_path(cart_id, "/items"))?
            .json(&AddCartItemRequest {
                product_id,
                quantity,
            });
        send_json(request).await
    }

    /// Remove a line from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn remove_cart_item(&self, cart_id: &str, item_id: &str) -> Result<Cart, BackendError> {
        let path = cart_path(cart_id, &format!("/items/{}", urlencoding::encode(item_id)));
        let request = self.request(Method::DELETE, &path)?;
        send_json(request).await
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend doesn't answer with a success status.
    pub async fn health(&self) -> Result<(), BackendError> {
        let request = self.request(Method::GET, "health")?;
        send_empty(request).await
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, BackendError> {
        let url = self.inner.base_url.join(path)?;
        Ok(self.authorized(self.inner.client.request(method, url)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.inner.api_token.expose_secret())
    }
}

/// Send a request and decode a JSON body.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
    let body = send(request).await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        BackendError::Parse(e)
    })
}

/// Send a request, ignoring the response body.
async fn send_empty(request: RequestBuilder) -> Result<(), BackendError> {
    send(request).await.map(|_| ())
}

/// Send a request and map non-success statuses to errors.
async fn send(request: RequestBuilder) -> Result<String, BackendError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().path().to_string();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(BackendError::RateLimited(retry_after));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound(url));
    }

    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            path = %url,
            body = %body.chars().take(500).collect::<String>(),
            "Backend returned non-success status"
        );
        return Err(BackendError::Status {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        });
    }

    Ok(body)
}

fn storefront_path(slug: &str, rest: &str) -> String {
    format!("storefronts/{}{rest}", urlencoding::encode(slug))
}

fn cart_path(cart_id: &str, rest: &str) -> String {
    format!("carts/{}{rest}", urlencoding::encode(cart_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(storefront_path("acme", "/theme"), "storefronts/acme/theme");
        assert_eq!(storefront_path("a/b?c", ""), "storefronts/a%2Fb%3Fc");
        assert_eq!(cart_path("c 1", "/items"), "carts/c%201/items");
    }
}
