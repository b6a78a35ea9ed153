//! Database migration command.
//!
//! ```bash
//! gs-cli migrate
//! ```
//!
//! Migrations live in `crates/storefront/migrations/` and include the
//! `tower_sessions.session` table used by the session store.

use super::{CommandError, connect};

/// Run the storefront migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails or a
/// migration cannot be applied.
pub async fn storefront() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Storefront migrations complete");
    Ok(())
}
