//! Storefront content modules.
//!
//! A module is a typed, configurable content block placed on a storefront
//! page. The backend stores the type as a free-form string, so the raw value
//! is kept on the record and only mapped onto [`ModuleType`] when rendering.
//! Types that don't map render as nothing.

pub mod layout;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ModuleId;

pub use layout::{ModuleLayout, footer_modules, main_modules, visible_modules};

/// Recognized module types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    HeroBanner,
    FeaturedProducts,
    ProductGrid,
    CategoryShowcase,
    Testimonials,
    Newsletter,
    AboutSection,
    ImageGallery,
    TextBlock,
    AnnouncementBar,
    ContactForm,
    SocialLinks,
    StoreInfo,
}

impl ModuleType {
    /// Every recognized module type.
    pub const ALL: [Self; 13] = [
        Self::HeroBanner,
        Self::FeaturedProducts,
        Self::ProductGrid,
        Self::CategoryShowcase,
        Self::Testimonials,
        Self::Newsletter,
        Self::AboutSection,
        Self::ImageGallery,
        Self::TextBlock,
        Self::AnnouncementBar,
        Self::ContactForm,
        Self::SocialLinks,
        Self::StoreInfo,
    ];

    /// Map a raw type string onto a known type.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// The wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeroBanner => "hero-banner",
            Self::FeaturedProducts => "featured-products",
            Self::ProductGrid => "product-grid",
            Self::CategoryShowcase => "category-showcase",
            Self::Testimonials => "testimonials",
            Self::Newsletter => "newsletter",
            Self::AboutSection => "about-section",
            Self::ImageGallery => "image-gallery",
            Self::TextBlock => "text-block",
            Self::AnnouncementBar => "announcement-bar",
            Self::ContactForm => "contact-form",
            Self::SocialLinks => "social-links",
            Self::StoreInfo => "store-info",
        }
    }

    /// Footer modules are rendered in the page footer, never in the main flow.
    #[must_use]
    pub const fn is_footer(self) -> bool {
        matches!(self, Self::ContactForm | Self::SocialLinks | Self::StoreInfo)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_visible() -> bool {
    true
}

/// A configured module as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontModule {
    pub id: ModuleId,
    /// Raw module type string.
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form settings; each renderer decodes the keys it understands.
    #[serde(default)]
    pub settings: Map<String, Value>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub order: Option<i32>,
}

impl StorefrontModule {
    /// Create a visible module with empty settings.
    #[must_use]
    pub fn new(id: impl Into<ModuleId>, module_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module_type: module_type.into(),
            title: None,
            settings: Map::new(),
            is_visible: true,
            order: None,
        }
    }

    /// The recognized type of this module, if any.
    #[must_use]
    pub fn kind(&self) -> Option<ModuleType> {
        ModuleType::parse(&self.module_type)
    }

    /// Whether the module belongs in the page footer.
    #[must_use]
    pub fn is_footer(&self) -> bool {
        self.kind().is_some_and(ModuleType::is_footer)
    }

    /// Sort position; a missing order counts as 0.
    #[must_use]
    pub fn sort_key(&self) -> i32 {
        self.order.unwrap_or(0)
    }
}
