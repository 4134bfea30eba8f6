//! Display data for templates.
//!
//! Views hold preformatted strings so templates stay free of formatting logic.

use shopfront_core::{CurrencyCode, Page, Price, Product, StoreInfo};

use crate::backend::{Cart, CartItem};

/// Product display data.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
    /// Product page URL.
    pub href: String,
}

impl ProductView {
    /// Build a view for a product of the store mounted at `base_path`.
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode, base_path: &str) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: Price::new(product.price, currency).display(),
            compare_at_price: product
                .is_on_sale()
                .then(|| product.compare_at_price.map(|p| Price::new(p, currency).display()))
                .flatten(),
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            in_stock: product.in_stock,
            href: format!(
                "{base_path}/products/{}",
                urlencoding::encode(product.id.as_str())
            ),
        }
    }

    /// Build a view for a cross-store search result.
    #[must_use]
    pub fn search_result(product: &Product) -> Self {
        let base_path = product
            .store_slug
            .as_deref()
            .map(store_path)
            .unwrap_or_default();
        let mut view = Self::new(product, CurrencyCode::default(), &base_path);
        if product.store_slug.is_none() {
            view.href = String::new();
        }
        view
    }
}

/// Store header/footer data.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub currency: CurrencyCode,
    /// URL prefix of the storefront, e.g. `/s/acme`.
    pub base_path: String,
}

impl From<&StoreInfo> for StoreView {
    fn from(store: &StoreInfo) -> Self {
        Self {
            slug: store.slug.clone(),
            name: store.name.clone(),
            description: store.description.clone(),
            logo_url: store.logo_url.clone(),
            currency: store.currency,
            base_path: store_path(&store.slug),
        }
    }
}

/// URL prefix of a storefront.
#[must_use]
pub fn store_path(slug: &str) -> String {
    format!("/s/{}", urlencoding::encode(slug))
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::new(rust_decimal::Decimal::ZERO, currency).display(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let item_view = |item: &CartItem| CartItemView {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: Price::new(item.price, cart.currency).display(),
            line_price: Price::new(item.line_total(), cart.currency).display(),
            image_url: item.image_url.clone(),
        };

        Self {
            items: cart.items.iter().map(item_view).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Pagination links.
#[derive(Debug, Clone)]
pub struct PageLinks {
    pub page: usize,
    pub total_pages: usize,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    /// Build links for `page`, using `href` to render the URL of a page number.
    #[must_use]
    pub fn new<T>(page: &Page<T>, href: impl Fn(usize) -> String) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages(),
            previous: page.has_previous().then(|| href(page.page - 1)),
            next: page.has_next().then(|| href(page.page + 1)),
        }
    }

    /// Whether there is more than one page.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

/// A selectable filter option (category facet, sort menu, theme category).
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}
