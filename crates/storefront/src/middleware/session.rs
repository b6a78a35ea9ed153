//! Session middleware configuration and cart persistence.
//!
//! Session data lives in `PostgreSQL`; the browser only holds a signed cookie
//! with the session id.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use geek_store_core::Cart;

use crate::config::StorefrontConfig;
use crate::models::session_keys;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gs_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Errors building the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("session secret is not usable as a signing key: {0}")]
    InvalidKey(String),
}

/// Derive the cookie signing key from the configured secret.
///
/// # Errors
///
/// Returns `SessionConfigError::InvalidKey` if the secret is shorter than
/// 64 bytes.
pub fn session_key(config: &StorefrontConfig) -> Result<Key, SessionConfigError> {
    Key::try_from(config.session_secret.expose_secret().as_bytes())
        .map_err(|e| SessionConfigError::InvalidKey(e.to_string()))
}

/// Create the session layer with `PostgreSQL` store.
///
/// # Errors
///
/// Returns `SessionConfigError` if the signing key cannot be derived.
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, SessionConfigError> {
    // The session table is created by the `tower_sessions` migration
    let store = PostgresStore::new(pool.clone());
    configure(SessionManagerLayer::new(store), config)
}

/// Apply cookie settings shared by every store.
pub(crate) fn configure<S: SessionStore + Clone>(
    layer: SessionManagerLayer<S>,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<S, SignedCookie>, SessionConfigError> {
    Ok(layer
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(session_key(config)?))
}

/// Read the visitor's cart; a missing cart is an empty one.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the visitor's cart back to the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}
