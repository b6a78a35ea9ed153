//! Authentication service.
//!
//! Password accounts only. Passwords are stored as Argon2id PHC strings with a
//! random per-user salt; verification goes through `PasswordVerifier`, which
//! compares digests in constant time.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use geek_store_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if any field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = require(name, "nombre")?;
        require(email, "email")?;
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let email = Email::parse(email)?;

        if self.users.email_exists(&email).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        // The unique index still catches a concurrent registration that slipped
        // past the existence check.
        let user = self
            .users
            .create(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Trim a form value and reject it when blank.
fn require<'s>(value: &'s str, field: &'static str) -> Result<&'s str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(trimmed)
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("hunter22"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_mismatch() {
        let hash = hash_password("hunter22").unwrap();
        assert!(matches!(
            verify_password("hunter23", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_plaintext_stored_value() {
        assert!(matches!(
            verify_password("hunter22", "hunter22"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_require_trims_and_rejects_blank() {
        assert_eq!(require("  Ana ", "nombre").unwrap(), "Ana");
        assert!(matches!(
            require("   ", "nombre"),
            Err(AuthError::MissingField("nombre"))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_duplicate_email_creates_one_row(pool: PgPool) {
        let auth = AuthService::new(&pool);
        auth.register("Ana", "ana@example.com", "pw").await.unwrap();

        let second = auth.register("Otra", "ana@example.com", "pw2").await;
        assert!(matches!(second, Err(AuthError::UserAlreadyExists)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_login_checks_password(pool: PgPool) {
        let auth = AuthService::new(&pool);
        let user = auth.register("Ana", "ana@example.com", "pw").await.unwrap();

        let ok = auth.login("ana@example.com", "pw").await.unwrap();
        assert_eq!(ok.id, user.id);
        assert!(matches!(
            auth.login("ana@example.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nadie@example.com", "pw").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_email_casings_share_one_account(pool: PgPool) {
        let auth = AuthService::new(&pool);
        let user = auth.register("Ana", "Ana@Example.com", "pw").await.unwrap();
        assert_eq!(user.email.as_str(), "ana@example.com");

        let second = auth.register("Otra", "ana@example.com", "pw2").await;
        assert!(matches!(second, Err(AuthError::UserAlreadyExists)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        for typed in ["ana@example.com", "ANA@EXAMPLE.COM"] {
            assert_eq!(auth.login(typed, "pw").await.unwrap().id, user.id);
        }
    }
}
