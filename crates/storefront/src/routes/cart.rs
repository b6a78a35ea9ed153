//! Cart route handlers.
//!
//! The cart lives in the session only. Each handler loads it, applies one
//! [`Cart`] operation and writes it back; unparseable form values redirect
//! without touching it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use geek_store_core::{Cart, ProductId};

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, load_cart, save_cart};
use crate::routes::PageContext;
use crate::state::AppState;

/// Form naming a single product (add and remove).
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(rename = "productoId", default)]
    pub product_id: String,
}

/// Quantity update form.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    #[serde(rename = "productoId", default)]
    pub product_id: String,
    #[serde(rename = "cantidad", default)]
    pub quantity: String,
}

impl UpdateCartForm {
    fn parsed(&self) -> Option<(ProductId, i32)> {
        let product_id = self.product_id.parse().ok()?;
        let quantity = self.quantity.trim().parse().ok()?;
        Some((product_id, quantity))
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: Cart,
}

/// Display the cart.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    let page = PageContext::from_cart(&state, &cart, user);

    Ok(CartShowTemplate { page, cart })
}

/// Add one unit of a product and return to the catalog.
///
/// Unknown products and lookup failures leave the cart as it was.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let Ok(product_id) = form.product_id.parse::<ProductId>() else {
        return Ok(Redirect::to("/productos").into_response());
    };

    let product = match ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await
    {
        Ok(Some(product)) => product,
        Ok(None) => {
            tracing::debug!(%product_id, "Add to cart for unknown product");
            return Ok(Redirect::to("/productos").into_response());
        }
        Err(e) => {
            tracing::warn!(%product_id, error = %e, "Product lookup failed");
            return Ok(Redirect::to("/productos").into_response());
        }
    };

    let mut cart = load_cart(&session).await?;
    cart.add(product.id, product.name, product.price);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/productos").into_response())
}

/// Set the quantity of a line. Quantities outside `1..=MAX_QUANTITY` are ignored.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    if let Some((product_id, quantity)) = form.parsed() {
        let mut cart = load_cart(&session).await?;
        if cart.update_quantity(product_id, quantity) {
            save_cart(&session, &cart).await?;
        }
    }

    Ok(Redirect::to("/carrito"))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<ProductForm>) -> Result<Redirect> {
    if let Ok(product_id) = form.product_id.parse::<ProductId>() {
        let mut cart = load_cart(&session).await?;
        if cart.remove(product_id) {
            save_cart(&session, &cart).await?;
        }
    }

    Ok(Redirect::to("/carrito"))
}
