//! User domain types.

use geek_store_core::{Email, UserId};

/// A registered customer. The password hash never leaves the repository
/// except for verification.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name given at registration.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: Email,
}
