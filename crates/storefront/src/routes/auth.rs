//! Authentication route handlers.
//!
//! Both forms live in the catalog header, so every outcome is a redirect to
//! `/productos`; failures carry their message in `registroError` or
//! `loginError`.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::redirect_with_message;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data. Missing fields arrive as empty strings.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Message shown under the registration form for a failed attempt.
fn register_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingField(_) => "Completa todos los campos.",
        AuthError::InvalidEmail(_) => "El correo no es válido.",
        AuthError::UserAlreadyExists => "El correo ya está registrado.",
        AuthError::InvalidCredentials | AuthError::Repository(_) | AuthError::PasswordHash => {
            "No se pudo registrar."
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an account and log the new user in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let user = match AuthService::new(state.pool())
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Registration failed");
            } else {
                tracing::debug!(error = %e, "Registration rejected");
            }
            return Ok(
                redirect_with_message("/productos", "registroError", register_error_message(&e))
                    .into_response(),
            );
        }
    };

    let current = CurrentUser::from(user);
    set_current_user(&session, &current).await?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    Ok(Redirect::to("/productos").into_response())
}

/// Log in with email and password.
///
/// Unknown emails and wrong passwords produce the same message.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            return Ok(
                redirect_with_message("/productos", "loginError", "Datos incorrectos.")
                    .into_response(),
            );
        }
        Err(e) => return Err(e.into()),
    };

    let current = CurrentUser::from(user);
    set_current_user(&session, &current).await?;
    set_sentry_user(&current.id, Some(current.email.as_str()));
    tracing::info!(user_id = %current.id, "User logged in");

    Ok(Redirect::to("/productos").into_response())
}

/// Drop the session (identity and cart).
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/productos"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use sqlx::PgPool;

    use super::*;
    use crate::routes::tests::{Visitor, db_app, location, post_form, register, send, test_app};

    const LOGIN_REDIRECT: &str = "/productos?loginError=Debes+iniciar+sesi%C3%B3n.";

    #[test]
    fn test_register_error_messages() {
        assert_eq!(
            register_error_message(&AuthError::MissingField("nombre")),
            "Completa todos los campos."
        );
        assert_eq!(
            register_error_message(&AuthError::UserAlreadyExists),
            "El correo ya está registrado."
        );
        assert_eq!(
            register_error_message(&AuthError::PasswordHash),
            "No se pudo registrar."
        );
    }

    #[tokio::test]
    async fn test_logout_redirects_to_catalog() {
        let response = send(test_app(), post_form("/logout", "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/productos");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_failed_login_leaves_visitor_anonymous(pool: PgPool) {
        AuthService::new(&pool)
            .register("Ana", "ana@example.com", "secreto")
            .await
            .unwrap();
        let mut visitor = Visitor::new(db_app(pool), "203.0.113.30");

        let response = visitor
            .post("/login", "email=ana@example.com&password=otra")
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/productos?loginError=Datos+incorrectos."
        );

        let response = visitor.get("/historial").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), LOGIN_REDIRECT);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_login_ignores_email_case(pool: PgPool) {
        let app = db_app(pool);
        let mut first = Visitor::new(app.clone(), "203.0.113.31");
        register(&mut first, "Ana@Example.com").await;

        let mut second = Visitor::new(app, "203.0.113.32");
        let response = second
            .post("/login", "email=ANA@example.COM&password=secreto")
            .await;
        assert_eq!(location(&response), "/productos");
        assert_eq!(second.get("/historial").await.status(), StatusCode::OK);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_logout_drops_identity(pool: PgPool) {
        let mut visitor = Visitor::new(db_app(pool), "203.0.113.33");
        register(&mut visitor, "ana@example.com").await;
        assert_eq!(visitor.get("/historial").await.status(), StatusCode::OK);

        visitor.post("/logout", "").await;
        let response = visitor.get("/historial").await;
        assert_eq!(location(&response), LOGIN_REDIRECT);
    }
}
