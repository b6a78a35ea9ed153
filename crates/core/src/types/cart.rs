//! Session-scoped shopping cart.
//!
//! The cart is a plain value: the storefront reads it from the visitor's
//! session, applies one of the operations below, and writes it back. Nothing
//! here touches storage, so every rule is checked by the unit tests at the
//! bottom of this file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::money::line_subtotal;

/// One product selection in the cart.
///
/// `unit_price` is a snapshot taken when the product was first added;
/// later catalog price changes do not affect an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub unit_price: Decimal,
    /// Between 1 and [`MAX_QUANTITY`].
    pub quantity: i32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.unit_price, self.quantity)
    }
}

/// Largest quantity a single cart line may hold.
///
/// At the highest catalog price (`NUMERIC(10, 2)`) a line subtotal stays
/// within the `NUMERIC(12, 2)` order columns.
pub const MAX_QUANTITY: i32 = 99;

/// Ordered list of cart lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// If the product already has a line its quantity grows by one (up to
    /// [`MAX_QUANTITY`]), otherwise a new line with quantity 1 is appended at
    /// the end.
    pub fn add(&mut self, product_id: ProductId, name: impl Into<String>, unit_price: Decimal) {
        if let Some(item) = self.find_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1).min(MAX_QUANTITY);
            return;
        }

        self.items.push(CartItem {
            product_id,
            name: name.into(),
            unit_price,
            quantity: 1,
        });
    }

    /// Set the quantity of an existing line.
    ///
    /// Quantities outside `1..=MAX_QUANTITY` and unknown products are ignored.
    /// Returns `true` when a line was updated.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i32) -> bool {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return false;
        }

        match self.find_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a product's line. Returns `true` when something was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() != before
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Number of units across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }
}
