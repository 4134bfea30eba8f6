//! Storefront module rendering.
//!
//! A storefront page is a list of configured modules. [`render_layout`]
//! drops hidden modules, splits footer modules from the main flow, orders
//! both groups, and renders each module with the renderer for its type.
//! Modules whose type isn't recognized render as nothing.
//!
//! Each renderer decodes the module's free-form settings into a typed struct
//! with defaults for every key; settings that don't decode at all fall back to
//! the defaults.

mod content;
mod footer;
mod hero;
mod products;

use askama::Template;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopfront_core::{
    ModuleLayout, ModuleType, Product, PublicStorefront, StoreInfo, StorefrontModule,
};

use crate::views::{ProductView, store_path};

/// Data available to every module renderer.
#[derive(Debug, Clone)]
pub struct ModuleContext<'a> {
    pub store: &'a StoreInfo,
    pub products: &'a [Product],
    /// URL prefix of the storefront, e.g. `/s/acme`.
    pub base_path: String,
}

impl<'a> ModuleContext<'a> {
    #[must_use]
    pub fn new(storefront: &'a PublicStorefront) -> Self {
        Self {
            store: &storefront.store,
            products: &storefront.products,
            base_path: store_path(&storefront.store.slug),
        }
    }

    fn product_view(&self, product: &Product) -> ProductView {
        ProductView::new(product, self.store.currency, &self.base_path)
    }

    fn products_href(&self) -> String {
        format!("{}/products", self.base_path)
    }
}

/// One rendered module.
#[derive(Debug, Clone)]
pub struct RenderedModule {
    pub id: String,
    pub kind: ModuleType,
    pub html: String,
}

/// Rendered main flow and footer of a page.
#[derive(Debug, Clone, Default)]
pub struct RenderedLayout {
    pub main: Vec<RenderedModule>,
    pub footer: Vec<RenderedModule>,
}

impl RenderedLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.footer.is_empty()
    }
}

/// Render one module.
///
/// Returns `Ok(None)` for unrecognized module types and for modules with
/// nothing to show.
///
/// # Errors
///
/// Returns an error if the module's template fails to render.
pub fn render_module(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let Some(kind) = module.kind() else {
        tracing::debug!(
            module_id = %module.id,
            module_type = %module.module_type,
            "Skipping module of unknown type"
        );
        return Ok(None);
    };

    match kind {
        ModuleType::HeroBanner => hero::hero_banner(module, ctx),
        ModuleType::AnnouncementBar => hero::announcement_bar(module, ctx),
        ModuleType::FeaturedProducts => products::featured_products(module, ctx),
        ModuleType::ProductGrid => products::product_grid(module, ctx),
        ModuleType::CategoryShowcase => products::category_showcase(module, ctx),
        ModuleType::Testimonials => content::testimonials(module, ctx),
        ModuleType::Newsletter => content::newsletter(module, ctx),
        ModuleType::AboutSection => content::about_section(module, ctx),
        ModuleType::ImageGallery => content::image_gallery(module, ctx),
        ModuleType::TextBlock => content::text_block(module, ctx),
        ModuleType::ContactForm => footer::contact_form(module, ctx),
        ModuleType::SocialLinks => footer::social_links(module, ctx),
        ModuleType::StoreInfo => footer::store_info(module, ctx),
    }
}

/// Plan and render the modules of a page.
///
/// # Errors
///
/// Returns an error if any module's template fails to render.
pub fn render_layout(
    modules: &[StorefrontModule],
    ctx: &ModuleContext<'_>,
) -> askama::Result<RenderedLayout> {
    let layout = ModuleLayout::plan(modules);
    Ok(RenderedLayout {
        main: render_group(&layout.main, ctx)?,
        footer: render_group(&layout.footer, ctx)?,
    })
}

fn render_group(
    modules: &[&StorefrontModule],
    ctx: &ModuleContext<'_>,
) -> askama::Result<Vec<RenderedModule>> {
    let mut rendered = Vec::with_capacity(modules.len());
    for module in modules {
        let Some(kind) = module.kind() else {
            tracing::debug!(module_id = %module.id, "Skipping module of unknown type");
            continue;
        };
        if let Some(html) = render_module(module, ctx)? {
            rendered.push(RenderedModule {
                id: module.id.to_string(),
                kind,
                html,
            });
        }
    }
    Ok(rendered)
}

/// Decode a module's settings, falling back to defaults when they don't fit.
fn settings<T: DeserializeOwned + Default>(module: &StorefrontModule) -> T {
    serde_json::from_value(Value::Object(module.settings.clone())).unwrap_or_else(|e| {
        tracing::warn!(
            module_id = %module.id,
            module_type = %module.module_type,
            error = %e,
            "Invalid module settings, using defaults"
        );
        T::default()
    })
}

/// Module title, then a settings heading, then `fallback`.
fn heading(module: &StorefrontModule, from_settings: Option<&str>, fallback: &str) -> String {
    [module.title.as_deref(), from_settings]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Split free text into paragraphs on blank lines.
fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Horizontal alignment of module text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlignment {
    /// CSS class of the alignment.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Left => "align-left",
            Self::Center => "align-center",
            Self::Right => "align-right",
        }
    }
}

/// Render a template into `Some(html)`.
fn render(template: &impl Template) -> askama::Result<Option<String>> {
    template.render().map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use serde_json::json;
    use shopfront_core::{CurrencyCode, StoreId, StorefrontCustomization};

    use super::*;

    pub(crate) fn storefront(modules: Vec<StorefrontModule>) -> PublicStorefront {
        let products = serde_json::from_value(json!([
            { "id": "p1", "name": "Linen Shirt", "price": "45.00", "category": "Apparel",
              "imageUrl": "https://cdn.test/shirt.jpg" },
            { "id": "p2", "name": "Ceramic Mug", "price": "18.00", "category": "Home" },
            { "id": "p3", "name": "Canvas Tote", "price": "22.00", "category": "Accessories" },
            { "id": "p4", "name": "Wool Scarf", "price": "30.00", "category": "Accessories",
              "compareAtPrice": "40.00" }
        ]))
        .unwrap();

        PublicStorefront {
            store: StoreInfo {
                id: StoreId::new("s1"),
                slug: "acme".to_string(),
                name: "Acme Goods".to_string(),
                description: Some("Useful things".to_string()),
                logo_url: None,
                banner_url: None,
                contact_email: Some("hello@acme.test".to_string()),
                phone: Some("+1 555 0100".to_string()),
                address: Some("1 Main St".to_string()),
                currency: CurrencyCode::USD,
            },
            products,
            customization: StorefrontCustomization {
                modules,
                ..StorefrontCustomization::default()
            },
        }
    }

    pub(crate) fn module(id: &str, kind: &str, settings: Value) -> StorefrontModule {
        StorefrontModule {
            settings: match settings {
                Value::Object(map) => map,
                _ => serde_json::Map::new(),
            },
            ..StorefrontModule::new(id, kind)
        }
    }

    pub(crate) fn render_one(module: &StorefrontModule) -> Option<String> {
        let sf = storefront(Vec::new());
        render_module(module, &ModuleContext::new(&sf)).unwrap()
    }

    #[test]
    fn test_every_known_type_renders() {
        for kind in ModuleType::ALL {
            let settings = if kind == ModuleType::AnnouncementBar {
                json!({ "message": "Free shipping" })
            } else {
                json!({})
            };
            let html = render_one(&module("m", kind.as_str(), settings));
            assert!(html.is_some(), "{kind} rendered nothing");
        }
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        assert_eq!(render_one(&module("x", "unknown-x", json!({}))), None);
    }

    #[test]
    fn test_footer_module_only_in_footer() {
        let mut hero = module("hero", "hero-banner", json!({ "title": "Welcome" }));
        hero.order = Some(2);
        let mut contact = module("contact", "contact-form", json!({}));
        contact.order = Some(1);

        let sf = storefront(vec![hero, contact]);
        let layout = render_layout(
            &sf.customization.modules,
            &ModuleContext::new(&sf),
        )
        .unwrap();

        assert_eq!(layout.main.len(), 1);
        assert_eq!(layout.main[0].kind, ModuleType::HeroBanner);
        assert!(layout.main[0].html.contains("Welcome"));
        assert_eq!(layout.footer.len(), 1);
        assert_eq!(layout.footer[0].kind, ModuleType::ContactForm);
    }

    #[test]
    fn test_hidden_and_unknown_modules_are_skipped() {
        let mut hidden = module("hidden", "text-block", json!({ "body": "secret" }));
        hidden.is_visible = false;
        let sf = storefront(vec![
            hidden,
            module("x", "unknown-x", json!({})),
            module("t", "text-block", json!({ "body": "shown" })),
        ]);

        let layout = render_layout(&sf.customization.modules, &ModuleContext::new(&sf)).unwrap();
        assert_eq!(layout.main.len(), 1);
        assert_eq!(layout.main[0].id, "t");
        assert!(layout.footer.is_empty());
    }

    #[test]
    fn test_invalid_settings_fall_back_to_defaults() {
        let html = render_one(&module(
            "g",
            "product-grid",
            json!({ "columns": "lots", "limit": -3 }),
        ))
        .unwrap();
        assert!(html.contains("grid-cols-3"));
        assert!(html.contains("Linen Shirt"));
    }

    #[test]
    fn test_heading_precedence() {
        let mut m = module("t", "text-block", json!({}));
        assert_eq!(heading(&m, Some("From settings"), "Fallback"), "From settings");
        assert_eq!(heading(&m, None, "Fallback"), "Fallback");
        m.title = Some("Title".to_string());
        assert_eq!(heading(&m, Some("From settings"), "Fallback"), "Title");
        m.title = Some("  ".to_string());
        assert_eq!(heading(&m, Some("From settings"), "Fallback"), "From settings");
        assert_eq!(heading(&m, None, "Fallback"), "Fallback");
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(paragraphs("One\n\n  Two \n\n\n"), vec!["One", "Two"]);
        assert!(paragraphs("   ").is_empty());
    }
}
