//! Domain models for the storefront.
//!
//! Row types derive `sqlx::FromRow` and double as the values handed to
//! templates; the session types live in [`session`].

pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use order::{NewOrderLine, Order, OrderDraft, OrderLine, group_lines_by_order};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
