//! Order history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Order, OrderLine};
use crate::routes::PageContext;
use crate::services::OrderService;
use crate::state::AppState;

/// Query parameters for the history page.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Present right after a successful checkout.
    #[serde(rename = "ordenExitosa")]
    pub order_placed: Option<String>,
}

/// One order and its lines, as shown on the history page.
#[derive(Debug)]
pub struct OrderView {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// History page template.
#[derive(Template, WebTemplate)]
#[template(path = "history/index.html")]
pub struct HistoryTemplate {
    pub page: PageContext,
    pub orders: Vec<OrderView>,
    pub order_placed: bool,
}

/// Display the user's orders, newest first.
#[instrument(skip(state, session, user), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<HistoryTemplate> {
    let mut history = OrderService::new(state.pool()).history(user.id).await?;

    let orders = history
        .orders
        .into_iter()
        .map(|order| {
            let lines = history.lines_by_order.remove(&order.id).unwrap_or_default();
            OrderView { order, lines }
        })
        .collect();

    let page = PageContext::load(&state, &session, Some(user)).await?;
    Ok(HistoryTemplate {
        page,
        orders,
        order_placed: query.order_placed.is_some(),
    })
}
