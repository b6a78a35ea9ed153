//! Order types: persisted rows and the draft built from a cart at checkout.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use geek_store_core::{Cart, OrderId, ProductId, UserId};

/// An order header from `ordenes`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An order line from `orden_detalle`, joined with the product name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// A line about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Everything needed to persist an order, computed once from the cart.
///
/// `total` is the sum of the line subtotals; it is stored on the header and
/// never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub total: Decimal,
    pub lines: Vec<NewOrderLine>,
}

impl OrderDraft {
    /// Build a draft from the cart. Returns `None` for an empty cart.
    #[must_use]
    pub fn from_cart(user_id: UserId, cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }

        let lines: Vec<NewOrderLine> = cart
            .items()
            .iter()
            .map(|item| NewOrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                subtotal: item.subtotal(),
            })
            .collect();

        Some(Self {
            user_id,
            total: lines.iter().map(|l| l.subtotal).sum(),
            lines,
        })
    }
}

/// Group order lines by the order they belong to, keeping query order.
#[must_use]
pub fn group_lines_by_order(lines: Vec<OrderLine>) -> HashMap<OrderId, Vec<OrderLine>> {
    let mut grouped: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        grouped.entry(line.order_id).or_default().push(line);
    }
    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn line(order: i32, product: i32, qty: i32, price: i64) -> OrderLine {
        OrderLine {
            order_id: OrderId::new(order),
            product_id: ProductId::new(product),
            product_name: format!("product-{product}"),
            quantity: qty,
            unit_price: Decimal::from(price),
            subtotal: Decimal::from(price * i64::from(qty)),
        }
    }

    #[test]
    fn test_from_cart_empty_is_none() {
        assert!(OrderDraft::from_cart(UserId::new(1), &Cart::new()).is_none());
    }

    #[test]
    fn test_from_cart_scenario() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "DualSense", Decimal::from(10));
        cart.update_quantity(ProductId::new(1), 2);
        cart.add(ProductId::new(2), "Funda", Decimal::from(5));

        let draft = OrderDraft::from_cart(UserId::new(7), &cart).unwrap();

        assert_eq!(draft.user_id, UserId::new(7));
        assert_eq!(draft.total, Decimal::from(25));
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[0].subtotal, Decimal::from(20));
        assert_eq!(draft.lines[0].quantity, 2);
        assert_eq!(draft.lines[1].subtotal, Decimal::from(5));
    }

    #[test]
    fn test_from_cart_total_matches_cart_total() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Game", Decimal::new(5999, 2));
        cart.add(ProductId::new(2), "Card", Decimal::new(1050, 2));
        cart.update_quantity(ProductId::new(2), 3);

        let draft = OrderDraft::from_cart(UserId::new(1), &cart).unwrap();
        assert_eq!(draft.total, cart.total());
    }

    #[test]
    fn test_group_lines_by_order() {
        let grouped = group_lines_by_order(vec![
            line(1, 10, 1, 5),
            line(2, 11, 2, 3),
            line(1, 12, 1, 7),
        ]);

        assert_eq!(grouped.len(), 2);
        let first = &grouped[&OrderId::new(1)];
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].product_id, ProductId::new(10));
        assert_eq!(first[1].product_id, ProductId::new(12));
        assert_eq!(grouped[&OrderId::new(2)][0].subtotal, Decimal::from(6));
    }

    #[test]
    fn test_group_lines_empty() {
        assert!(group_lines_by_order(Vec::new()).is_empty());
    }
}
