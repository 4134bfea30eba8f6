//! Backend REST API client.
//!
//! # Architecture
//!
//! - JSON over HTTP with `reqwest`, bearer-token authenticated
//! - The backend owns storefronts, products, carts and submissions; nothing
//!   is persisted locally
//! - Storefront payloads are cached in memory via `moka` (TTL from config)
//!   and invalidated for a slug when its theme is saved
//!
//! # Example
//!
//! ```rust,ignore
//! let client = BackendClient::new(&config.backend)?;
//! let storefront = client.storefront("acme").await?;
//! let cart = client.create_cart("acme").await?;
//! let cart = client.add_cart_item(&cart.id, &storefront.products[0].id, 1).await?;
//! ```

mod client;

pub use client::BackendClient;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{CartId, CartItemId, CurrencyCode, Price, ProductId};
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status other than 404 and 429.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body didn't match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A shopping cart as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    /// Slug of the storefront the cart belongs to.
    pub storefront: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub currency: CurrencyCode,
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Cart {
    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let amount = self
            .items
            .iter()
            .map(CartItem::line_total)
            .sum::<Decimal>();
        Price::new(amount, self.currency)
    }
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Contact form submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

/// Newsletter signup.
#[derive(Debug, Clone, Serialize)]
pub struct NewsletterSignup {
    pub email: String,
}

#[derive(Debug, Serialize)]
struct CreateCartRequest<'a> {
    storefront: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddCartItemRequest<'a> {
    product_id: &'a str,
    quantity: u32,
}
