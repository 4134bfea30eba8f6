//! Session-stored state.
//!
//! Carts and theme drafts are scoped per storefront, so a shopper browsing
//! two stores keeps two carts.

use shopfront_core::{CartId, ThemeEditor};
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Prefix of the per-storefront cart ID key.
    pub const CART_PREFIX: &str = "cart:";

    /// Prefix of the per-storefront theme editor draft key.
    pub const THEME_DRAFT_PREFIX: &str = "theme_draft:";
}

/// Cart ID of one storefront in the session.
pub struct CartSession<'a> {
    session: &'a Session,
    key: String,
}

impl<'a> CartSession<'a> {
    #[must_use]
    pub fn new(session: &'a Session, slug: &str) -> Self {
        Self {
            session,
            key: format!("{}{slug}", keys::CART_PREFIX),
        }
    }

    /// The stored cart ID, if any. Session read failures count as no cart.
    pub async fn get(&self) -> Option<CartId> {
        self.session.get::<CartId>(&self.key).await.ok().flatten()
    }

    /// Remember the cart ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn set(&self, cart_id: &CartId) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(&self.key, cart_id).await
    }

    /// Forget the cart (e.g. it expired on the backend).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn clear(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.remove::<CartId>(&self.key).await.map(|_| ())
    }
}

/// Theme editor draft of one storefront in the session.
pub struct ThemeDraftSession<'a> {
    session: &'a Session,
    key: String,
}

impl<'a> ThemeDraftSession<'a> {
    #[must_use]
    pub fn new(session: &'a Session, slug: &str) -> Self {
        Self {
            session,
            key: format!("{}{slug}", keys::THEME_DRAFT_PREFIX),
        }
    }

    /// The stored draft, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the draft no longer
    /// deserializes.
    pub async fn load(&self) -> Result<Option<ThemeEditor>, tower_sessions::session::Error> {
        self.session.get::<ThemeEditor>(&self.key).await
    }

    /// Store the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn store(&self, editor: &ThemeEditor) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(&self.key, editor).await
    }
}
