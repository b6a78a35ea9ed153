//! Receipt download handler.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use geek_store_core::OrderId;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::receipt::{Receipt, pdf};
use crate::services::OrderService;
use crate::state::AppState;

const ORDER_NOT_FOUND: &str = "Orden no encontrada.";

/// Stream the PDF receipt of one of the user's orders.
///
/// Orders of other users are reported exactly like missing ones.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn download(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(order_id): Path<String>,
) -> Result<Response> {
    let order_id: OrderId = order_id
        .parse()
        .map_err(|_| AppError::NotFound(ORDER_NOT_FOUND.to_string()))?;

    let data = OrderService::new(state.pool())
        .receipt(order_id, user.id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(ORDER_NOT_FOUND.to_string()),
            other => AppError::Database(other),
        })?;

    let receipt = Receipt::build(&state.config().store_name, &user, &data.order, &data.lines);
    let bytes = pdf::render(&receipt)?;
    let disposition = format!("inline; filename=\"{}\"", Receipt::file_name(&data.order));

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{StatusCode, header};
    use sqlx::PgPool;

    use geek_store_core::OrderId;

    use crate::routes::tests::{
        Visitor, db_app, get, location, register, seed_product, send, test_app,
    };

    #[tokio::test]
    async fn test_receipt_requires_login() {
        let response = send(test_app(), get("/ticket/1")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/productos?loginError="));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_receipt_only_for_owner(pool: PgPool) {
        let mando = seed_product(&pool, "DualSense", 10).await;
        let app = db_app(pool.clone());

        let mut ana = Visitor::new(app.clone(), "203.0.113.20");
        register(&mut ana, "ana@example.com").await;
        ana.post("/carrito/agregar", &format!("productoId={mando}")).await;
        ana.post("/checkout", "").await;
        let order_id: OrderId = sqlx::query_scalar("SELECT id FROM ordenes")
            .fetch_one(&pool)
            .await
            .unwrap();

        let response = ana.get(&format!("/ticket/{order_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );

        let mut luis = Visitor::new(app, "203.0.113.21");
        register(&mut luis, "luis@example.com").await;
        let response = luis.get(&format!("/ticket/{order_id}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_ne!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_receipt_for_non_numeric_id_is_not_found(pool: PgPool) {
        let mut ana = Visitor::new(db_app(pool), "203.0.113.22");
        register(&mut ana, "ana@example.com").await;

        let response = ana.get("/ticket/abc").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
