//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Liveness check
//! GET    /health/ready                   - Readiness check (user store)
//!
//! # Catalog
//! GET    /api/products                   - Collections listing (filters, sort, paging)
//! GET    /api/products/featured          - Featured products
//! GET    /api/products/{id}              - Product detail
//! GET    /api/rings                      - Rings listing
//! GET    /api/earrings                   - Earrings listing
//! GET    /api/search?q=                  - Name/category search
//!
//! # Cart
//! GET    /api/cart                       - Cart with totals
//! DELETE /api/cart                       - Empty the cart
//! POST   /api/cart/items                 - Add (merges by product id)
//! PATCH  /api/cart/items/{id}            - Set quantity (<= 0 removes)
//! DELETE /api/cart/items/{id}            - Remove line
//! POST   /api/cart/promo                 - Apply a promo code
//! DELETE /api/cart/promo                 - Drop the promo code
//! GET    /api/cart/count                 - Badge count
//!
//! # Wishlist
//! GET    /api/wishlist                   - Saved items
//! POST   /api/wishlist                   - Save an item
//! DELETE /api/wishlist                   - Clear
//! DELETE /api/wishlist/{id}              - Remove one
//! POST   /api/wishlist/{id}/move-to-cart - Move one unit to the cart
//! GET    /api/wishlist/events            - SSE `wishlistUpdated` stream
//!
//! # Account
//! POST   /api/auth/login                 - Login
//! POST   /api/auth/register              - Register and log in
//! POST   /api/auth/logout                - Logout
//! GET    /api/auth/me                    - Current user (requires auth)
//! GET    /api/orders?search=&status=     - Order history (requires auth)
//!
//! # Checkout
//! POST   /api/checkout                   - Open a payment attempt
//! POST   /api/checkout/complete          - Verify payment, notify, clear cart
//! GET    /api/checkout/summary           - Totals for the current cart
//! GET    /order-success?orderId=         - Confirmation payload
//!
//! # Providers
//! POST   /api/razorpay/create-order      - Create a gateway order
//! POST   /api/razorpay/verify-payment    - Check a payment signature
//! POST   /api/twilio/send-sms            - Send an SMS
//!
//! # Misc
//! POST   /api/contact                    - Contact form
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/featured", get(products::featured))
        .route("/products/{id}", get(products::show))
        .route("/rings", get(products::rings))
        .route("/earrings", get(products::earrings))
        .route("/search", get(products::search))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
        .route(
            "/promo",
            post(cart::apply_promo).delete(cart::remove_promo),
        )
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(wishlist::show)
                .post(wishlist::add)
                .delete(wishlist::clear),
        )
        .route("/events", get(wishlist::events))
        .route("/{id}", axum::routing::delete(wishlist::remove))
        .route("/{id}/move-to-cart", post(wishlist::move_to_cart))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::begin))
        .route("/complete", post(checkout::complete))
        .route("/summary", get(checkout::summary))
}

/// Create the payment and SMS provider routes.
pub fn provider_routes() -> Router<AppState> {
    Router::new()
        .route("/razorpay/create-order", post(api::razorpay::create_order))
        .route(
            "/razorpay/verify-payment",
            post(api::razorpay::verify_payment),
        )
        .route("/twilio/send-sms", post(api::twilio::send_sms))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(product_routes())
        .merge(provider_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/auth", auth_routes())
        .nest("/checkout", checkout_routes())
        .route("/orders", get(orders::index))
        .route("/contact", post(contact::submit));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/order-success", get(checkout::order_success))
        .nest("/api", api)
}

/// Build the complete application with sessions, tracing and Sentry.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 when the user store cannot be read.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.users().check_readable().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "User store not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
