//! Storefront payloads served by the fake backend.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use shopfront_core::{
    CurrencyCode, Product, ProductId, PublicStorefront, StoreId, StoreInfo,
    StorefrontCustomization, StorefrontModule,
};

/// Slug of the fully configured fixture store.
pub const ACME: &str = "acme";

/// Slug of a store with no customization at all.
pub const BARE: &str = "bare";

fn store(slug: &str, name: &str) -> StoreInfo {
    StoreInfo {
        id: StoreId::new(format!("store-{slug}")),
        slug: slug.to_string(),
        name: name.to_string(),
        description: Some(format!("{name} sells things for the home.")),
        logo_url: None,
        banner_url: None,
        contact_email: Some(format!("hello@{slug}.test")),
        phone: None,
        address: None,
        currency: CurrencyCode::USD,
    }
}

fn product(id: &str, name: &str, cents: i64, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} for every room."),
        price: Decimal::new(cents, 2),
        compare_at_price: None,
        image_url: None,
        category: Some(category.to_string()),
        tags: vec!["home".to_string()],
        in_stock: true,
        store_slug: None,
    }
}

fn module(
    id: &str,
    kind: &str,
    title: &str,
    order: Option<i32>,
    settings: Value,
) -> StorefrontModule {
    let mut module = StorefrontModule::new(id, kind);
    module.title = Some(title.to_string());
    module.order = order;
    module.settings = settings.as_object().cloned().unwrap_or_default();
    module
}

/// Acme: five products, a custom module layout and a registry theme.
#[must_use]
pub fn acme() -> PublicStorefront {
    let mut candle = product("p-candle", "Soy Candle", 1800, "Home");
    candle.compare_at_price = Some(Decimal::new(2400, 2));
    let mut rug = product("p-rug", "Jute Rug", 12_000, "Home");
    rug.in_stock = false;

    let mut hidden = module(
        "m-hidden",
        "text-block",
        "Secret Sale",
        Some(0),
        json!({ "content": "Hidden copy" }),
    );
    hidden.is_visible = false;

    PublicStorefront {
        store: store(ACME, "Acme Goods"),
        products: vec![
            product("p-lamp", "Brass Lamp", 8900, "Lighting"),
            product("p-vase", "Clay Vase", 3400, "Home"),
            rug,
            candle,
            product("p-shade", "Linen Shade", 4500, "Lighting"),
        ],
        customization: StorefrontCustomization {
            theme_id: "elegant-noir".to_string(),
            custom_theme: None,
            modules: vec![
                module("m-hero", "hero-banner", "Welcome to Acme", Some(2), json!({})),
                module("m-contact", "contact-form", "Write to us", Some(1), json!({})),
                hidden,
                module("m-mystery", "unknown-x", "Mystery", Some(5), json!({})),
                module(
                    "m-announce",
                    "announcement-bar",
                    "Announcement",
                    Some(0),
                    json!({ "message": "Free shipping over $50" }),
                ),
                module(
                    "m-featured",
                    "featured-products",
                    "Staff picks",
                    Some(3),
                    json!({ "productIds": ["p-vase", "p-lamp"] }),
                ),
            ],
        },
    }
}

/// Bare: no modules, no products, default customization.
#[must_use]
pub fn bare() -> PublicStorefront {
    PublicStorefront {
        store: store(BARE, "Bare Store"),
        products: Vec::new(),
        customization: StorefrontCustomization::default(),
    }
}
