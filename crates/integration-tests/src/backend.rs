//! In-memory fake of the backend REST API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::Value;
use shopfront_core::catalog::paginate;
use shopfront_core::{CartId, CartItemId, PublicStorefront, StorefrontTheme};
use shopfront_storefront::backend::{Cart, CartItem};

use crate::{API_TOKEN, fixtures};

#[derive(Default)]
struct Data {
    storefronts: HashMap<String, PublicStorefront>,
    storefront_fetches: HashMap<String, usize>,
    carts: HashMap<String, Cart>,
    contacts: Vec<(String, Value)>,
    subscribers: Vec<(String, String)>,
    saved_themes: Vec<(String, StorefrontTheme)>,
    unhealthy: bool,
}

/// Shared handle to the fake backend's state.
#[derive(Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<Data>>,
}

impl FakeBackend {
    /// A backend serving the `acme` and `bare` fixture stores.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let backend = Self::default();
        backend.insert(fixtures::acme());
        backend.insert(fixtures::bare());
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Data> {
        self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Add or replace a storefront.
    pub fn insert(&self, storefront: PublicStorefront) {
        self.lock()
            .storefronts
            .insert(storefront.store.slug.clone(), storefront);
    }

    /// How many times the storefront payload was fetched.
    #[must_use]
    pub fn storefront_fetches(&self, slug: &str) -> usize {
        self.lock().storefront_fetches.get(slug).copied().unwrap_or(0)
    }

    /// Contact submissions received, with their storefront slug.
    #[must_use]
    pub fn contacts(&self) -> Vec<(String, Value)> {
        self.lock().contacts.clone()
    }

    /// Newsletter subscribers, with their storefront slug.
    #[must_use]
    pub fn subscribers(&self) -> Vec<(String, String)> {
        self.lock().subscribers.clone()
    }

    /// Themes saved through `PUT /storefronts/{slug}/theme`.
    #[must_use]
    pub fn saved_themes(&self) -> Vec<(String, StorefrontTheme)> {
        self.lock().saved_themes.clone()
    }

    /// Forget every cart, as if they all expired.
    pub fn expire_carts(&self) {
        self.lock().carts.clear();
    }

    /// Make `GET /health` fail.
    pub fn set_unhealthy(&self) {
        self.lock().unhealthy = true;
    }

    /// The REST API router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/storefronts/{slug}", get(storefront))
            .route("/storefronts/{slug}/theme", put(save_theme))
            .route("/storefronts/{slug}/contact", post(contact))
            .route("/storefronts/{slug}/newsletter", post(newsletter))
            .route("/search/products", get(search))
            .route("/carts", post(create_cart))
            .route("/carts/{id}", get(cart))
            .route("/carts/{id}/items", post(add_item))
            .route("/carts/{id}/items/{item_id}", delete(remove_item))
            .layer(middleware::from_fn(require_token))
            .with_state(self.clone())
    }
}

async fn require_token(request: Request, next: Next) -> Response {
    let expected = format!("Bearer {API_TOKEN}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected.as_bytes());
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn health(State(backend): State<FakeBackend>) -> StatusCode {
    if backend.lock().unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

async fn storefront(State(backend): State<FakeBackend>, Path(slug): Path<String>) -> Response {
    let mut data = backend.lock();
    *data.storefront_fetches.entry(slug.clone()).or_default() += 1;
    match data.storefronts.get(&slug) {
        Some(storefront) => Json(storefront.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn save_theme(
    State(backend): State<FakeBackend>,
    Path(slug): Path<String>,
    Json(theme): Json<StorefrontTheme>,
) -> StatusCode {
    let mut data = backend.lock();
    let Some(storefront) = data.storefronts.get_mut(&slug) else {
        return StatusCode::NOT_FOUND;
    };
    storefront.customization.theme_id.clone_from(&theme.id);
    storefront.customization.custom_theme = Some(theme.clone());
    data.saved_themes.push((slug, theme));
    StatusCode::NO_CONTENT
}

async fn contact(
    State(backend): State<FakeBackend>,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut data = backend.lock();
    if !data.storefronts.contains_key(&slug) {
        return StatusCode::NOT_FOUND;
    }
    data.contacts.push((slug, body));
    StatusCode::CREATED
}

#[derive(Deserialize)]
struct Signup {
    email: String,
}

async fn newsletter(
    State(backend): State<FakeBackend>,
    Path(slug): Path<String>,
    Json(signup): Json<Signup>,
) -> StatusCode {
    let mut data = backend.lock();
    let entry = (slug, signup.email);
    if data.subscribers.contains(&entry) {
        return StatusCode::CONFLICT;
    }
    data.subscribers.push(entry);
    StatusCode::CREATED
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
    page: usize,
    limit: usize,
}

async fn search(State(backend): State<FakeBackend>, Query(params): Query<SearchParams>) -> Response {
    let needle = params.q.to_lowercase();
    let data = backend.lock();

    let mut slugs: Vec<&String> = data.storefronts.keys().collect();
    slugs.sort();
    let matches: Vec<_> = slugs
        .into_iter()
        .filter_map(|slug| data.storefronts.get(slug).map(|s| (slug, s)))
        .flat_map(|(slug, storefront)| {
            storefront.products.iter().map(move |product| {
                let mut product = product.clone();
                product.store_slug = Some(slug.clone());
                product
            })
        })
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .collect();

    Json(paginate(matches, params.page, params.limit)).into_response()
}

#[derive(Deserialize)]
struct NewCart {
    storefront: String,
}

async fn create_cart(State(backend): State<FakeBackend>, Json(body): Json<NewCart>) -> Response {
    let mut data = backend.lock();
    let Some(currency) = data
        .storefronts
        .get(&body.storefront)
        .map(|s| s.store.currency)
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let cart = Cart {
        id: CartId::new(uuid::Uuid::new_v4().to_string()),
        storefront: body.storefront,
        items: Vec::new(),
        currency,
    };
    data.carts.insert(cart.id.to_string(), cart.clone());
    (StatusCode::CREATED, Json(cart)).into_response()
}

async fn cart(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    match backend.lock().carts.get(&id) {
        Some(cart) => Json(cart.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewItem {
    product_id: String,
    quantity: u32,
}

async fn add_item(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(item): Json<NewItem>,
) -> Response {
    let mut guard = backend.lock();
    let data = &mut *guard;
    let Some(cart) = data.carts.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(product) = data
        .storefronts
        .get(&cart.storefront)
        .and_then(|s| s.product(&item.product_id))
    else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "unknown product").into_response();
    };

    if let Some(line) = cart
        .items
        .iter_mut()
        .find(|line| line.product_id.as_str() == item.product_id)
    {
        line.quantity += item.quantity;
    } else {
        cart.items.push(CartItem {
            id: CartItemId::new(format!("line-{}", cart.items.len() + 1)),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: item.quantity,
            image_url: product.image_url.clone(),
        });
    }
    Json(cart.clone()).into_response()
}

async fn remove_item(
    State(backend): State<FakeBackend>,
    Path((id, item_id)): Path<(String, String)>,
) -> Response {
    let mut data = backend.lock();
    let Some(cart) = data.carts.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    cart.items.retain(|line| line.id.as_str() != item_id);
    Json(cart.clone()).into_response()
}
