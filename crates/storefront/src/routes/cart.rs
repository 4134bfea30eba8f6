//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each storefront has its own backend cart; its ID is kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopfront_core::theme::generate_theme_css;
use tower_sessions::Session;
use tracing::instrument;

use super::is_htmx;
use crate::backend::{BackendError, Cart};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::CartSession;
use crate::state::AppState;
use crate::views::{CartView, StoreView, store_path};

const MAX_QUANTITY: u32 = 99;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nonce: String,
    pub theme_css: String,
    pub store: StoreView,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub base_path: String,
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Fetch the session's cart for a storefront.
///
/// A cart the backend no longer knows is dropped from the session.
async fn current_cart(state: &AppState, carts: &CartSession<'_>) -> Result<Option<Cart>> {
    let Some(cart_id) = carts.get().await else {
        return Ok(None);
    };

    match state.backend().cart(cart_id.as_str()).await {
        Ok(cart) => Ok(Some(cart)),
        Err(BackendError::NotFound(_)) => {
            tracing::info!(cart_id = %cart_id, "Cart expired, clearing from session");
            carts.clear().await?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Display cart page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<CartShowTemplate> {
    let storefront = state.backend().storefront(&slug).await?;
    let store = StoreView::from(&storefront.store);

    let carts = CartSession::new(&session, &slug);
    let cart = current_cart(&state, &carts)
        .await?
        .map_or_else(|| CartView::empty(store.currency), |cart| CartView::from(&cart));

    Ok(CartShowTemplate {
        nonce,
        theme_css: generate_theme_css(storefront.theme()),
        store,
        cart,
    })
}

/// Add item to cart (HTMX).
///
/// Creates a new cart if the session has none (or its cart expired).
/// Returns the count badge with an HTMX trigger so other elements refresh.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let storefront = state.backend().storefront(&slug).await?;
    if storefront.product(&form.product_id).is_none() {
        return Err(AppError::BadRequest("That product isn't sold here.".to_string()));
    }
    let quantity = form.quantity.unwrap_or(1).clamp(1, MAX_QUANTITY);

    let carts = CartSession::new(&session, &slug);
    let backend = state.backend();

    let added = match carts.get().await {
        Some(cart_id) => {
            match backend
                .add_cart_item(cart_id.as_str(), &form.product_id, quantity)
                .await
            {
                Err(BackendError::NotFound(_)) => None,
                result => Some(result?),
            }
        }
        None => None,
    };
    let cart = match added {
        Some(cart) => cart,
        None => {
            let cart = backend.create_cart(&slug).await?;
            backend
                .add_cart_item(cart.id.as_str(), &form.product_id, quantity)
                .await?
        }
    };
    carts.set(&cart.id).await?;

    let quantity = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added item to cart",
        &[
            ("storefront", slug.as_str()),
            ("product_id", form.product_id.as_str()),
            ("quantity", quantity.as_str()),
        ],
    );

    if !is_htmx(&headers) {
        return Ok(Redirect::to(&format!("{}/cart", store_path(&slug))).into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let storefront = state.backend().storefront(&slug).await?;
    let base_path = store_path(&slug);
    let carts = CartSession::new(&session, &slug);

    let cart = match carts.get().await {
        Some(cart_id) => match state
            .backend()
            .remove_cart_item(cart_id.as_str(), &form.item_id)
            .await
        {
            Ok(cart) => CartView::from(&cart),
            Err(BackendError::NotFound(_)) => {
                carts.clear().await?;
                CartView::empty(storefront.store.currency)
            }
            Err(e) => return Err(e.into()),
        },
        None => CartView::empty(storefront.store.currency),
    };

    if !is_htmx(&headers) {
        return Ok(Redirect::to(&format!("{base_path}/cart")).into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { base_path, cart },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
///
/// Never fails: the badge shows 0 when the cart can't be loaded.
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
) -> CartCountTemplate {
    let carts = CartSession::new(&session, &slug);
    let count = match current_cart(&state, &carts).await {
        Ok(cart) => cart.map_or(0, |cart| cart.item_count()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load cart count");
            0
        }
    };

    CartCountTemplate { count }
}
