//! User repository for database operations.
//!
//! Queries are checked at runtime with `sqlx::query_as` so the crate builds
//! without a live database.

use sqlx::PgPool;

use geek_store_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Row returned when loading a user together with the stored hash.
#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    id: UserId,
    name: String,
    email: Email,
    password_hash: String,
}

/// Repository for the `usuarios` table.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether an account with this email exists, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM usuarios WHERE lower(email) = lower($1)
            )
            ",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Create a new user with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO usuarios (nombre, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, nombre AS name, email
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email already exists"))
    }

    /// Get a user and their password hash by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            r"
            SELECT id, nombre AS name, email, password_hash
            FROM usuarios
            WHERE lower(email) = lower($1)
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_read)?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    name: r.name,
                    email: r.email,
                },
                r.password_hash,
            )
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_lookup_ignores_case(pool: PgPool) {
        sqlx::query(
            "INSERT INTO usuarios (nombre, email, password_hash) VALUES ('Ana', 'Ana@Example.com', 'x')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let repo = UserRepository::new(&pool);
        let email = Email::parse("ana@example.com").unwrap();
        assert!(repo.email_exists(&email).await.unwrap());

        let (user, hash) = repo.get_password_hash(&email).await.unwrap().unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email.as_str(), "ana@example.com");
        assert_eq!(hash, "x");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_unique_index_ignores_case(pool: PgPool) {
        let repo = UserRepository::new(&pool);
        sqlx::query(
            "INSERT INTO usuarios (nombre, email, password_hash) VALUES ('Ana', 'ANA@EXAMPLE.COM', 'x')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let email = Email::parse("ana@example.com").unwrap();
        assert!(matches!(
            repo.create("Otra", &email, "y").await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_invalid_stored_email_is_data_corruption(pool: PgPool) {
        sqlx::query(
            "INSERT INTO usuarios (nombre, email, password_hash) VALUES ('Ana', 'sin-arroba', 'x')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = sqlx::query_as::<_, User>("SELECT id, nombre AS name, email FROM usuarios")
            .fetch_one(&pool)
            .await
            .map_err(RepositoryError::from_read);
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
