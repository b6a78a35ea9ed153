//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the catalog
//!
//! # Catalog
//! GET  /productos              - Product listing (+ loginError / registroError)
//!
//! # Cart (session only)
//! POST /carrito/agregar        - Add one unit of a product
//! GET  /carrito                - Cart page
//! POST /carrito/actualizar     - Set the quantity of a line
//! POST /carrito/eliminar       - Remove a line
//!
//! # Auth (rate limited)
//! POST /registro               - Create an account and log in
//! POST /login                  - Log in
//! POST /logout                 - Drop the session
//!
//! # Checkout (requires auth)
//! GET  /checkout               - Confirmation page
//! POST /checkout               - Place the order
//!
//! # Orders (requires auth)
//! GET  /historial              - Order history (+ ordenExitosa)
//! GET  /ticket/{orden_id}      - PDF receipt
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod history;
pub mod receipt;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_sessions::Session;

use geek_store_core::Cart;

use crate::error::Result;
use crate::middleware::{auth_rate_limiter, load_cart};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Data every page layout needs: store name, greeting and cart badge.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub store_name: String,
    pub user: Option<CurrentUser>,
    /// Sum of quantities in the visitor's cart.
    pub cart_count: i64,
}

impl PageContext {
    /// Build the layout data for the current visitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read from the session.
    pub async fn load(
        state: &AppState,
        session: &Session,
        user: Option<CurrentUser>,
    ) -> Result<Self> {
        let cart = load_cart(session).await?;
        Ok(Self::from_cart(state, &cart, user))
    }

    /// Build the layout data from a cart the handler already loaded.
    #[must_use]
    pub fn from_cart(state: &AppState, cart: &Cart, user: Option<CurrentUser>) -> Self {
        Self {
            store_name: state.config().store_name.clone(),
            user,
            cart_count: cart.item_count(),
        }
    }
}

/// Redirect to `path` carrying `message` in the `key` query parameter.
///
/// The message is form-urlencoded so non-ASCII text is a valid `Location`.
#[must_use]
pub fn redirect_with_message(path: &str, key: &str, message: &str) -> Redirect {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("{path}?{key}={encoded}"))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/agregar", post(cart::add))
        .route("/actualizar", post(cart::update))
        .route("/eliminar", post(cart::remove))
}

/// Create the credential routes router, rate limited per client IP.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/registro", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::root))
        .route("/productos", get(catalog::index))
        .nest("/carrito", cart_routes())
        .merge(auth_routes())
        .route("/logout", post(auth::logout))
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route("/historial", get(history::index))
        .route("/ticket/{orden_id}", get(receipt::download))
}
