//! The public storefront payload.
//!
//! Everything needed to render one tenant's shop: store metadata, the
//! product list and the owner's customization (theme + modules).

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::module::{ModuleLayout, StorefrontModule};
use crate::theme::{StorefrontTheme, registry};
use crate::types::{CurrencyCode, StoreId};

/// Store metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub id: StoreId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub currency: CurrencyCode,
}

/// The owner's storefront customization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontCustomization {
    #[serde(default = "default_theme_id")]
    pub theme_id: String,
    /// A customized copy of the theme, when the owner saved one.
    #[serde(default)]
    pub custom_theme: Option<StorefrontTheme>,
    #[serde(default)]
    pub modules: Vec<StorefrontModule>,
}

fn default_theme_id() -> String {
    registry::DEFAULT_THEME_ID.to_string()
}

impl Default for StorefrontCustomization {
    fn default() -> Self {
        Self {
            theme_id: default_theme_id(),
            custom_theme: None,
            modules: Vec::new(),
        }
    }
}

/// A storefront as served to shoppers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStorefront {
    pub store: StoreInfo,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub customization: StorefrontCustomization,
}

impl PublicStorefront {
    /// The theme to render with: the saved custom theme, else the registry
    /// theme, else the default theme.
    #[must_use]
    pub fn theme(&self) -> &StorefrontTheme {
        self.customization
            .custom_theme
            .as_ref()
            .unwrap_or_else(|| registry::resolve(&self.customization.theme_id))
    }

    /// The page layout of the configured modules.
    #[must_use]
    pub fn layout(&self) -> ModuleLayout<'_> {
        ModuleLayout::plan(&self.customization.modules)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }
}
