//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::Product;
use crate::routes::PageContext;
use crate::state::AppState;

/// Inline messages passed back by the login and registration forms.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "loginError")]
    pub login_error: Option<String>,
    #[serde(rename = "registroError")]
    pub register_error: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub page: PageContext,
    pub products: Vec<Product>,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
}

/// `GET /` has no page of its own.
pub async fn root() -> Redirect {
    Redirect::to("/productos")
}

/// Display the full catalog.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<ProductsIndexTemplate> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let page = PageContext::load(&state, &session, user).await?;

    Ok(ProductsIndexTemplate {
        page,
        products,
        login_error: query.login_error,
        register_error: query.register_error,
    })
}
