//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shopfront_core::{
    Page, Product, ProductSort,
    catalog::{categories, filter_by_category, filter_products, paginate, sort_products},
    theme::generate_theme_css,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;
use crate::views::{FilterOption, PageLinks, ProductView, StoreView};

const RELATED_PRODUCTS: usize = 4;

/// Product listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub page: Option<usize>,
}

impl BrowseQuery {
    fn sort(&self) -> ProductSort {
        ProductSort::parse(&self.sort)
    }

    /// Query string for `page` with the other parameters kept.
    fn page_href(&self, base: &str, page: usize) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !self.q.trim().is_empty() {
            query.append_pair("q", self.q.trim());
        }
        if self.sort() != ProductSort::Featured {
            query.append_pair("sort", self.sort().as_str());
        }
        if let Some(category) = &self.category {
            query.append_pair("category", category);
        }
        query.append_pair("page", &page.to_string());
        format!("{base}?{}", query.finish())
    }
}

/// Filter, sort and paginate a storefront's products.
#[must_use]
pub fn browse<'a>(
    products: &'a [Product],
    query: &BrowseQuery,
    per_page: usize,
) -> Page<&'a Product> {
    let mut matches = filter_products(products, &query.q);
    if let Some(category) = &query.category {
        matches = filter_by_category(matches, category);
    }
    sort_products(&mut matches, query.sort());
    paginate(matches, query.page.unwrap_or(1), per_page)
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub store: StoreView,
    pub query: String,
    pub categories: Vec<FilterOption>,
    pub sorts: Vec<FilterOption>,
    pub products: Vec<ProductView>,
    pub total: usize,
    pub links: PageLinks,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub store: StoreView,
    pub product: ProductView,
    pub tags: Vec<String>,
    pub related: Vec<ProductView>,
}

/// Display a storefront's product listing.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<BrowseQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<ProductsIndexTemplate> {
    let storefront = state.backend().storefront(&slug).await?;
    let store = StoreView::from(&storefront.store);
    let base = format!("{}/products", store.base_path);

    let page = browse(&storefront.products, &query, state.config().products_per_page);
    let links = PageLinks::new(&page, |n| query.page_href(&base, n));

    let categories = categories(&storefront.products)
        .into_iter()
        .map(|c| FilterOption {
            selected: query
                .category
                .as_deref()
                .is_some_and(|selected| selected.eq_ignore_ascii_case(&c)),
            value: c.clone(),
            label: c,
        })
        .collect();
    let sorts = ProductSort::ALL
        .into_iter()
        .map(|s| FilterOption {
            value: s.as_str().to_string(),
            label: s.label().to_string(),
            selected: s == query.sort(),
        })
        .collect();

    Ok(ProductsIndexTemplate {
        nonce,
        theme_css: generate_theme_css(storefront.theme()),
        query: query.q.trim().to_string(),
        categories,
        sorts,
        total: page.total,
        products: page
            .items
            .iter()
            .map(|p| ProductView::new(p, store.currency, &store.base_path))
            .collect(),
        links,
        store,
    })
}

/// Display a product detail page.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    CspNonce(nonce): CspNonce,
) -> Result<ProductShowTemplate> {
    let storefront = state.backend().storefront(&slug).await?;
    let product = storefront
        .product(&id)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    let store = StoreView::from(&storefront.store);

    let related = product
        .category
        .as_deref()
        .map(|category| {
            filter_by_category(storefront.products.iter().collect(), category)
                .into_iter()
                .filter(|p| p.id != product.id)
                .take(RELATED_PRODUCTS)
                .map(|p| ProductView::new(p, store.currency, &store.base_path))
                .collect()
        })
        .unwrap_or_default();

    Ok(ProductShowTemplate {
        nonce,
        theme_css: generate_theme_css(storefront.theme()),
        product: ProductView::new(product, store.currency, &store.base_path),
        tags: product.tags.clone(),
        related,
        store,
    })
}
