//! Catalog product.

use rust_decimal::Decimal;

use geek_store_core::ProductId;

/// A product row from `productos`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
