//! Order repository: checkout writes and history/receipt reads.

use sqlx::PgPool;

use geek_store_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderDraft, OrderLine};

/// Repository for `ordenes` and `orden_detalle`.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order header and all of its lines atomically.
    ///
    /// Either every row is written or none is: a failure on any line rolls
    /// back the header as well.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert or the commit fails.
    pub async fn create_with_lines(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO ordenes (usuario_id, total)
            VALUES ($1, $2)
            RETURNING id, usuario_id AS user_id, total, fecha_orden AS created_at
            ",
        )
        .bind(draft.user_id)
        .bind(draft.total)
        .fetch_one(&mut *tx)
        .await?;

        for line in &draft.lines {
            sqlx::query(
                r"
                INSERT INTO orden_detalle
                    (orden_id, producto_id, cantidad, precio_unitario, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.subtotal)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// All orders of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, usuario_id AS user_id, total, fecha_orden AS created_at
            FROM ordenes
            WHERE usuario_id = $1
            ORDER BY fecha_orden DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// A single order, only if it belongs to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, usuario_id AS user_id, total, fecha_orden AS created_at
            FROM ordenes
            WHERE id = $1 AND usuario_id = $2
            ",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Lines of several orders in one round trip, joined with product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<OrderLine>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let lines = sqlx::query_as::<_, OrderLine>(
            r"
            SELECT od.orden_id AS order_id, od.producto_id AS product_id,
                   p.nombre AS product_name, od.cantidad AS quantity,
                   od.precio_unitario AS unit_price, od.subtotal
            FROM orden_detalle od
            JOIN productos p ON p.id = od.producto_id
            WHERE od.orden_id = ANY($1)
            ORDER BY od.orden_id, od.id
            ",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Lines of one order, joined with product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_order(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        self.lines_for_orders(&[order_id]).await
    }
}
