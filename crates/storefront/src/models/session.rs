//! Session-related types.
//!
//! The session holds two values: the visitor's cart and, once logged in,
//! their identity.

use serde::{Deserialize, Serialize};

use geek_store_core::{Email, UserId};

use super::User;

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name, printed on receipts.
    pub name: String,
    /// User's email address.
    pub email: Email,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart (`geek_store_core::Cart`).
    pub const CART: &str = "cart";

    /// Key for the current logged-in user.
    pub const USER: &str = "user";
}
