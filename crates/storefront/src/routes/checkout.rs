//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use geek_store_core::Cart;

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, load_cart, save_cart};
use crate::routes::PageContext;
use crate::services::OrderService;
use crate::state::AppState;

/// Checkout confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub cart: Cart,
}

/// Show the order summary before confirming.
#[instrument(skip(state, session, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/carrito").into_response());
    }

    let page = PageContext::from_cart(&state, &cart, Some(user));
    Ok(CheckoutTemplate { page, cart }.into_response())
}

/// Place the order and empty the cart.
///
/// The cart is cleared only once the order and all its lines are committed.
#[instrument(skip(state, session, user), fields(user_id = %user.id))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;

    let Some(_order) = OrderService::new(state.pool())
        .place_order(user.id, &cart)
        .await?
    else {
        return Ok(Redirect::to("/carrito"));
    };

    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/historial?ordenExitosa=1"))
}
