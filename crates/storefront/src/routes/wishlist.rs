//! Wishlist route handlers.
//!
//! The wishlist lives in the session under `wishlist`. Mutations that change
//! it publish exactly one [`WishlistEvent`]; no-ops (duplicate add, removing
//! an unknown id, clearing an empty list) publish nothing.

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tower_sessions::Session;
use tracing::instrument;

use nurvi_core::{CartItem, ProductId, Wishlist, WishlistItem};

use super::cart::{CartResponse, load_cart, save_cart};
use crate::error::{AppError, Result};
use crate::middleware::{load_or_default, wishlist_client_id};
use crate::models::session_keys;
use crate::services::WishlistEvent;
use crate::state::AppState;

/// SSE event name for wishlist changes.
pub const WISHLIST_UPDATED_EVENT: &str = "wishlistUpdated";

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub items: Vec<WishlistItem>,
    pub count: usize,
    /// Whether the request changed the wishlist.
    pub changed: bool,
}

impl WishlistResponse {
    fn new(wishlist: &Wishlist, changed: bool) -> Self {
        Self {
            items: wishlist.items().to_vec(),
            count: wishlist.len(),
            changed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoveToCartResponse {
    pub wishlist: WishlistResponse,
    pub cart: CartResponse,
}

async fn load_wishlist(session: &Session) -> Result<Wishlist> {
    Ok(load_or_default(session, session_keys::WISHLIST).await?)
}

/// Store the wishlist and announce the new count.
async fn commit(state: &AppState, session: &Session, wishlist: &Wishlist) -> Result<()> {
    session.insert(session_keys::WISHLIST, wishlist).await?;
    let client_id = wishlist_client_id(session).await?;
    state.wishlist_bus().publish(WishlistEvent {
        client_id,
        count: wishlist.len(),
    });
    Ok(())
}

/// GET /api/wishlist
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<WishlistResponse>> {
    let wishlist = load_wishlist(&session).await?;
    Ok(Json(WishlistResponse::new(&wishlist, false)))
}

/// POST /api/wishlist
#[instrument(skip(state, session, item), fields(product_id = %item.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(item): Json<WishlistItem>,
) -> Result<Json<WishlistResponse>> {
    if item.id.as_str().trim().is_empty() {
        return Err(AppError::Validation("Product id is required".to_string()));
    }

    let mut wishlist = load_wishlist(&session).await?;
    let changed = wishlist.add(item);
    if changed {
        commit(&state, &session, &wishlist).await?;
    }

    Ok(Json(WishlistResponse::new(&wishlist, changed)))
}

/// DELETE /api/wishlist/{id}
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<WishlistResponse>> {
    let mut wishlist = load_wishlist(&session).await?;
    let changed = wishlist.remove(&ProductId::new(id));
    if changed {
        commit(&state, &session, &wishlist).await?;
    }

    Ok(Json(WishlistResponse::new(&wishlist, changed)))
}

/// DELETE /api/wishlist
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<WishlistResponse>> {
    let mut wishlist = load_wishlist(&session).await?;
    let changed = wishlist.clear();
    if changed {
        commit(&state, &session, &wishlist).await?;
    }

    Ok(Json(WishlistResponse::new(&wishlist, changed)))
}

/// POST /api/wishlist/{id}/move-to-cart
///
/// Adds one unit to the cart at the catalog price and drops the item from
/// the wishlist. Ids no longer in the catalog are a 404 and change nothing.
#[instrument(skip(state, session))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<MoveToCartResponse>> {
    let id = ProductId::new(id);
    let mut wishlist = load_wishlist(&session).await?;
    if wishlist.get(&id).is_none() {
        return Err(AppError::NotFound(format!("Wishlist item {id}")));
    }
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let mut cart = load_cart(&session).await?;
    cart.add_item(CartItem::from_product(product, 1));
    let cart_view = CartResponse::try_from(&cart)?;
    save_cart(&session, &cart).await?;

    wishlist.remove(&id);
    commit(&state, &session, &wishlist).await?;

    Ok(Json(MoveToCartResponse {
        wishlist: WishlistResponse::new(&wishlist, true),
        cart: cart_view,
    }))
}

/// GET /api/wishlist/events
///
/// Server-sent `wishlistUpdated` events for this browser's wishlist.
#[instrument(skip(state, session))]
pub async fn events(
    State(state): State<AppState>,
    session: Session,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    let client_id = wishlist_client_id(&session).await?;
    let mut rx = state.wishlist_bus().subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) if event.client_id == client_id => {
                    yield Event::default().event(WISHLIST_UPDATED_EVENT).json_data(&event);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Wishlist event stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
