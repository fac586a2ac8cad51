//! Cart route handlers.
//!
//! The cart lives in the session under `cart`. Every handler loads it,
//! applies one mutation, builds the cart view, and only then stores it back,
//! so a cart whose totals cannot be computed is never persisted.
//!
//! Lines are always priced from the catalog; clients send ids, not prices.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use nurvi_core::{Cart, CartError, CartItem, OrderSummary, Price, ProductId, PromoCode};

use crate::error::{AppError, Result};
use crate::middleware::load_or_default;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart contents with derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total: Price,
    pub item_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoCode>,
    pub discount: Price,
    pub summary: OrderSummary,
}

impl TryFrom<&Cart> for CartResponse {
    type Error = CartError;

    fn try_from(cart: &Cart) -> std::result::Result<Self, Self::Error> {
        let summary = cart.summary()?;
        Ok(Self {
            items: cart.items().to_vec(),
            total: summary.subtotal,
            item_count: cart.item_count(),
            promo: cart.promo(),
            discount: summary.discount,
            summary,
        })
    }
}

/// Badge count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCountResponse {
    pub item_count: u32,
}

/// Add-to-cart request. Name, price and image come from the catalog.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: ProductId,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub customization: Option<String>,
}

const fn one() -> u32 {
    1
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct PromoRequest {
    pub code: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(load_or_default(session, session_keys::CART).await?)
}

/// Store the session cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Build the view for `cart`, then store it.
async fn commit(session: &Session, cart: &Cart) -> Result<Json<CartResponse>> {
    let response = CartResponse::try_from(cart)?;
    save_cart(session, cart).await?;
    Ok(Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse::try_from(&cart)?))
}

/// POST /api/cart/items
///
/// Unknown product ids are a 404.
#[instrument(skip(state, session, request), fields(product_id = %request.id, quantity = request.quantity))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let product = state
        .catalog()
        .get(&request.id)
        .ok_or_else(|| AppError::NotFound(format!("Product {}", request.id)))?;

    let mut item = CartItem::from_product(product, request.quantity);
    item.size = request.size;
    item.color = request.color;
    item.customization = request.customization;

    let mut cart = load_cart(&session).await?;
    cart.add_item(item);
    commit(&session, &cart).await
}

/// PATCH /api/cart/items/{id}
///
/// Zero or negative quantities remove the line; unknown ids change nothing.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&ProductId::new(id), request.quantity);
    commit(&session, &cart).await
}

/// DELETE /api/cart/items/{id}
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(id): Path<String>) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(&ProductId::new(id));
    commit(&session, &cart).await
}

/// DELETE /api/cart
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    commit(&session, &cart).await
}

/// POST /api/cart/promo
///
/// Unknown codes are a 400 and leave the cart as it was.
#[instrument(skip(session, request))]
pub async fn apply_promo(
    session: Session,
    Json(request): Json<PromoRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    let promo = cart.apply_promo(&request.code)?;
    tracing::info!(promo = %promo, "Promo code applied");
    commit(&session, &cart).await
}

/// DELETE /api/cart/promo
#[instrument(skip(session))]
pub async fn remove_promo(session: Session) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_promo();
    commit(&session, &cart).await
}

/// GET /api/cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCountResponse {
        item_count: cart.item_count(),
    }))
}
