//! Demo storefront used to preview themes without a real store.

use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use shopfront_core::{
    CurrencyCode, Product, ProductId, PublicStorefront, StoreId, StoreInfo,
    StorefrontCustomization, StorefrontModule,
};

/// Slug of the demo store.
pub const SAMPLE_SLUG: &str = "sample";

/// A small demo store showing off every module type, styled with `theme_id`.
#[must_use]
pub fn sample_storefront(theme_id: &str) -> PublicStorefront {
    PublicStorefront {
        store: StoreInfo {
            id: StoreId::new("sample-store"),
            slug: SAMPLE_SLUG.to_string(),
            name: "Harbor & Pine".to_string(),
            description: Some(
                "Small-batch goods for slow mornings and long weekends.".to_string(),
            ),
            logo_url: None,
            banner_url: None,
            contact_email: Some("hello@harborandpine.example".to_string()),
            phone: Some("+1 555 0134".to_string()),
            address: Some("42 Wharf Street, Portland".to_string()),
            currency: CurrencyCode::USD,
        },
        products: sample_products(),
        customization: StorefrontCustomization {
            theme_id: theme_id.to_string(),
            custom_theme: None,
            modules: sample_modules(),
        },
    }
}

fn product(id: &str, name: &str, cents: i64, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name}, made in small batches."),
        price: Decimal::new(cents, 2),
        compare_at_price: None,
        image_url: None,
        category: Some(category.to_string()),
        tags: Vec::new(),
        in_stock: true,
        store_slug: Some(SAMPLE_SLUG.to_string()),
    }
}

fn sample_products() -> Vec<Product> {
    let mut on_sale = product("candle", "Cedar Candle", 2400, "Home");
    on_sale.compare_at_price = Some(Decimal::new(3200, 2));
    let mut sold_out = product("blanket", "Wool Throw", 12_000, "Home");
    sold_out.in_stock = false;

    vec![
        product("mug", "Stoneware Mug", 2800, "Kitchen"),
        on_sale,
        product("tote", "Waxed Canvas Tote", 5600, "Accessories"),
        product("beans", "Morning Roast Beans", 1800, "Kitchen"),
        sold_out,
        product("cap", "Field Cap", 3400, "Accessories"),
    ]
}

fn module(id: &str, kind: &str, order: i32, settings: Value) -> StorefrontModule {
    StorefrontModule {
        order: Some(order),
        settings: match settings {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        ..StorefrontModule::new(id, kind)
    }
}

fn sample_modules() -> Vec<StorefrontModule> {
    vec![
        module(
            "announcement",
            "announcement-bar",
            0,
            json!({ "message": "Free shipping on orders over $50" }),
        ),
        module(
            "hero",
            "hero-banner",
            1,
            json!({ "subtitle": "Goods for slow mornings", "ctaText": "Shop the collection" }),
        ),
        module("featured", "featured-products", 2, json!({ "limit": 3 })),
        module("categories", "category-showcase", 3, json!({})),
        module(
            "testimonials",
            "testimonials",
            4,
            json!({
                "testimonials": [
                    { "quote": "The mug is my new favorite thing.", "author": "Riley", "rating": 5 },
                    { "quote": "Beautiful candle, lovely scent.", "author": "Jordan", "rating": 4 }
                ]
            }),
        ),
        module(
            "about",
            "about-section",
            5,
            json!({ "body": "We started in a garage by the harbor.\n\nEverything we sell is made by people we know." }),
        ),
        module("newsletter", "newsletter", 6, json!({})),
        module("grid", "product-grid", 7, json!({ "columns": 3, "sort": "price-asc" })),
        module("store-info", "store-info", 8, json!({ "hours": "Tue-Sun 10-6" })),
        module(
            "social",
            "social-links",
            9,
            json!({ "links": [{ "platform": "instagram", "url": "https://instagram.com/" }] }),
        ),
        module("contact", "contact-form", 10, json!({})),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::ModuleType;

    use super::*;
    use crate::modules::{ModuleContext, render_layout};

    #[test]
    fn test_sample_uses_requested_theme() {
        let sf = sample_storefront("bold-market");
        assert_eq!(sf.theme().id, "bold-market");
        let sf = sample_storefront("nope");
        assert_eq!(sf.theme().id, "modern-minimal");
    }

    #[test]
    fn test_sample_renders_main_and_footer() {
        let sf = sample_storefront("modern-minimal");
        let layout = render_layout(&sf.customization.modules, &ModuleContext::new(&sf)).unwrap();
        assert_eq!(layout.main.first().map(|m| m.kind), Some(ModuleType::AnnouncementBar));
        assert_eq!(layout.footer.len(), 3);
        assert!(layout.main.iter().all(|m| !m.kind.is_footer()));
    }
}
