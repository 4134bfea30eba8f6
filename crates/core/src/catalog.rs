//! Product catalog browsing: filtering, sorting and pagination.
//!
//! These operate on a product list already fetched from the backend.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Maximum page size accepted by [`paginate`].
pub const MAX_PER_PAGE: usize = 100;

/// A product as served by the inventory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Owning storefront, set on cross-store search results.
    #[serde(default)]
    pub store_slug: Option<String>,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Whether the product is discounted against its compare-at price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .is_some_and(|compare_at| compare_at > self.price)
    }

    /// Case-insensitive substring match over name, description, category and tags.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|category| category.to_lowercase().contains(needle))
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Keep the products matching a free-text query.
///
/// An empty or whitespace-only query keeps everything.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.matches(&needle)).collect()
}

/// Keep the products of one category (case-insensitive exact match).
#[must_use]
pub fn filter_by_category<'a>(products: Vec<&'a Product>, category: &str) -> Vec<&'a Product> {
    products
        .into_iter()
        .filter(|p| {
            p.category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        })
        .collect()
}

/// Distinct product categories, sorted.
///
/// Categories differing only in case are one category, spelled as it first
/// appears in `products`.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = products
        .iter()
        .filter_map(|p| p.category.clone())
        .filter(|c| !c.trim().is_empty())
        .collect();
    categories.sort_by_key(|c| c.to_ascii_lowercase());
    categories.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    categories
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Backend order.
    #[default]
    Featured,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    /// Every sort option, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::NameAsc,
        Self::NameDesc,
        Self::PriceAsc,
        Self::PriceDesc,
    ];

    /// Parse a sort parameter; unknown values mean [`ProductSort::Featured`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "name" | "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Featured,
        }
    }

    /// Query string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::NameAsc => "name",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
            Self::PriceAsc => "Price: low to high",
            Self::PriceDesc => "Price: high to low",
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort products in place. The sort is stable; `Featured` keeps input order.
pub fn sort_products(products: &mut [&Product], sort: ProductSort) {
    match sort {
        ProductSort::Featured => {}
        ProductSort::NameAsc => {
            products.sort_by_cached_key(|p| p.name.to_lowercase());
        }
        ProductSort::NameDesc => {
            products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()));
        }
        ProductSort::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        ProductSort::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    /// Total number of items across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Number of pages (at least 1).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.total == 0 || self.per_page == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Map the items, keeping the paging information.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Cut one page out of `items`.
///
/// `page` is clamped to at least 1 and `per_page` to `1..=MAX_PER_PAGE`.
/// Pages past the end are empty.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total = items.len();
    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
    }
}
