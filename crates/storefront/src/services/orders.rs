//! Order service: checkout, history and receipt lookups.

use std::collections::HashMap;

use sqlx::PgPool;

use geek_store_core::{Cart, OrderId, UserId};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::{Order, OrderDraft, OrderLine, group_lines_by_order};

/// A user's orders with their lines grouped by order id.
#[derive(Debug, Default)]
pub struct OrderHistory {
    /// Newest first.
    pub orders: Vec<Order>,
    pub lines_by_order: HashMap<OrderId, Vec<OrderLine>>,
}

/// One order with its lines, ready for the receipt renderer.
#[derive(Debug)]
pub struct ReceiptData {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Order workflows on top of [`OrderRepository`].
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Turn the cart into a persisted order.
    ///
    /// Returns `Ok(None)` when the cart is empty; nothing is written in that
    /// case. The caller clears the cart only after this returns an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the transaction fails; no rows are kept.
    pub async fn place_order(
        &self,
        user_id: UserId,
        cart: &Cart,
    ) -> Result<Option<Order>, RepositoryError> {
        let Some(draft) = OrderDraft::from_cart(user_id, cart) else {
            return Ok(None);
        };

        let order = self.orders.create_with_lines(&draft).await?;
        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total = %order.total,
            lines = draft.lines.len(),
            "Order placed"
        );
        Ok(Some(order))
    }

    /// All orders of a user with their lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either query fails.
    pub async fn history(&self, user_id: UserId) -> Result<OrderHistory, RepositoryError> {
        let orders = self.orders.list_for_user(user_id).await?;
        if orders.is_empty() {
            return Ok(OrderHistory::default());
        }

        let ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        let lines = self.orders.lines_for_orders(&ids).await?;

        Ok(OrderHistory {
            orders,
            lines_by_order: group_lines_by_order(lines),
        })
    }

    /// Order and lines for a receipt, only if the order belongs to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist or
    /// belongs to someone else.
    pub async fn receipt(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<ReceiptData, RepositoryError> {
        let order = self
            .orders
            .get_for_user(order_id, user_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        let lines = self.orders.lines_for_order(order.id).await?;

        Ok(ReceiptData { order, lines })
    }
}
