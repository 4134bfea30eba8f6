//! Product listing modules.

use askama::Template;
use serde::Deserialize;
use shopfront_core::{
    ProductSort, StorefrontModule,
    catalog::{categories, filter_by_category, filter_products, sort_products},
};

use super::{ModuleContext, heading, render, settings};
use crate::views::ProductView;

const DEFAULT_FEATURED_LIMIT: usize = 4;
const DEFAULT_GRID_COLUMNS: u8 = 3;
const MAX_GRID_COLUMNS: u8 = 6;

#[derive(Template)]
#[template(path = "modules/product_list.html")]
struct ProductListTemplate {
    heading: String,
    products: Vec<ProductView>,
    columns: u8,
    view_all: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FeaturedProductsSettings {
    heading: Option<String>,
    product_ids: Vec<String>,
    limit: Option<usize>,
}

/// Hand-picked products, or the first few of the catalog.
pub(super) fn featured_products(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: FeaturedProductsSettings = settings(module);
    let limit = s.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);

    let products: Vec<ProductView> = if s.product_ids.is_empty() {
        ctx.products
            .iter()
            .take(limit)
            .map(|p| ctx.product_view(p))
            .collect()
    } else {
        s.product_ids
            .iter()
            .filter_map(|id| ctx.products.iter().find(|p| p.id.as_str() == id))
            .take(limit)
            .map(|p| ctx.product_view(p))
            .collect()
    };

    render(&ProductListTemplate {
        heading: heading(module, s.heading.as_deref(), "Featured products"),
        products,
        columns: columns(None),
        view_all: Some(ctx.products_href()),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProductGridSettings {
    heading: Option<String>,
    columns: Option<u8>,
    limit: Option<usize>,
    category: Option<String>,
    query: Option<String>,
    sort: Option<String>,
}

/// Grid column count, clamped to `1..=6`.
fn columns(requested: Option<u8>) -> u8 {
    requested
        .unwrap_or(DEFAULT_GRID_COLUMNS)
        .clamp(1, MAX_GRID_COLUMNS)
}

/// Filtered and sorted product grid.
pub(super) fn product_grid(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: ProductGridSettings = settings(module);

    let mut products = filter_products(ctx.products, s.query.as_deref().unwrap_or_default());
    if let Some(category) = s.category.as_deref().filter(|c| !c.trim().is_empty()) {
        products = filter_by_category(products, category);
    }
    sort_products(
        &mut products,
        s.sort.as_deref().map_or(ProductSort::default(), ProductSort::parse),
    );
    if let Some(limit) = s.limit {
        products.truncate(limit);
    }

    render(&ProductListTemplate {
        heading: heading(module, s.heading.as_deref(), "Shop all"),
        products: products.into_iter().map(|p| ctx.product_view(p)).collect(),
        columns: columns(s.columns),
        view_all: None,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CategoryShowcaseSettings {
    heading: Option<String>,
    categories: Vec<String>,
}

struct CategoryCard {
    name: String,
    count: usize,
    image_url: Option<String>,
    href: String,
}

#[derive(Template)]
#[template(path = "modules/category_showcase.html")]
struct CategoryShowcaseTemplate {
    heading: String,
    categories: Vec<CategoryCard>,
}

/// One card per category, linking to the filtered product listing.
pub(super) fn category_showcase(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: CategoryShowcaseSettings = settings(module);

    let names = if s.categories.is_empty() {
        categories(ctx.products)
    } else {
        s.categories
    };

    let cards = names
        .into_iter()
        .map(|name| {
            let in_category = filter_by_category(ctx.products.iter().collect(), &name);
            CategoryCard {
                count: in_category.len(),
                image_url: in_category.iter().find_map(|p| p.image_url.clone()),
                href: format!(
                    "{}?category={}",
                    ctx.products_href(),
                    urlencoding::encode(&name)
                ),
                name,
            }
        })
        .collect();

    render(&CategoryShowcaseTemplate {
        heading: heading(module, s.heading.as_deref(), "Shop by category"),
        categories: cards,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::tests::{module, render_one};
    use super::*;

    fn position(html: &str, needle: &str) -> usize {
        html.find(needle).unwrap_or(usize::MAX)
    }

    #[test]
    fn test_featured_defaults_to_first_products() {
        let html = render_one(&module("f", "featured-products", json!({ "limit": 2 })))
            .unwrap_or_default();
        assert!(html.contains("Featured products"));
        assert!(html.contains("Linen Shirt"));
        assert!(html.contains("Ceramic Mug"));
        assert!(!html.contains("Canvas Tote"));
        assert!(html.contains("href=\"/s/acme/products\""));
    }

    #[test]
    fn test_featured_picks_listed_ids_in_order() {
        let html = render_one(&module(
            "f",
            "featured-products",
            json!({ "productIds": ["p4", "missing", "p2"] }),
        ))
        .unwrap_or_default();
        assert!(html.contains("Wool Scarf"));
        assert!(html.contains("Ceramic Mug"));
        assert!(!html.contains("Linen Shirt"));
        assert!(position(&html, "Wool Scarf") < position(&html, "Ceramic Mug"));
    }

    #[test]
    fn test_grid_filters_sorts_and_limits() {
        let html = render_one(&module(
            "g",
            "product-grid",
            json!({ "category": "accessories", "sort": "price-desc", "columns": 9 }),
        ))
        .unwrap_or_default();
        assert!(html.contains("grid-cols-6"));
        assert!(!html.contains("Linen Shirt"));
        assert!(position(&html, "Wool Scarf") < position(&html, "Canvas Tote"));

        let html = render_one(&module("g", "product-grid", json!({ "limit": 1 })))
            .unwrap_or_default();
        assert!(html.contains("Linen Shirt"));
        assert!(!html.contains("Ceramic Mug"));
    }

    #[test]
    fn test_grid_shows_sale_price() {
        let html = render_one(&module("g", "product-grid", json!({}))).unwrap_or_default();
        assert!(html.contains("$40.00"));
        assert!(html.contains("$30.00"));
    }

    #[test]
    fn test_empty_grid_shows_message() {
        let html = render_one(&module("g", "product-grid", json!({ "category": "Garden" })))
            .unwrap_or_default();
        assert!(html.contains("No products yet"));
    }

    #[test]
    fn test_category_showcase_counts_products() {
        let html = render_one(&module("c", "category-showcase", json!({}))).unwrap_or_default();
        assert!(html.contains("Accessories"));
        assert!(html.contains("2 products"));
        assert!(html.contains("1 product<"));
        assert!(html.contains("/s/acme/products?category=Apparel"));
        assert!(html.contains("https://cdn.test/shirt.jpg"));
    }

    #[test]
    fn test_columns_clamped() {
        assert_eq!(columns(None), 3);
        assert_eq!(columns(Some(0)), 1);
        assert_eq!(columns(Some(12)), 6);
    }
}
