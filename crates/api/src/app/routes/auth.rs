use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use mpsystem_auth::{NewUser, Role, TokenIssuer, User};
use mpsystem_core::DomainError;
use mpsystem_infra::Repository;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Authenticated auth endpoints; login and register are mounted publicly.
pub fn router() -> Router {
    Router::new()
        .route("/logout", post(logout))
        .route("/profile", get(profile))
}

/// POST /api/auth/login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let (Some(username), Some(password)) = (
        body.username.filter(|s| !s.trim().is_empty()),
        body.password.filter(|s| !s.is_empty()),
    ) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username and password are required",
        );
    };
    let username = username.trim().to_string();

    let found = services
        .stores
        .users
        .list(&|u: &User| u.username == username)
        .into_iter()
        .next();
    let user = match found {
        Some(u) if u.is_active() && u.verify_password(&password) => u,
        _ => {
            tracing::warn!(%username, "rejected login");
            return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid credentials");
        }
    };

    let now = Utc::now();
    let user = match services.stores.users.update(user.id, &mut |u| {
        u.record_login(now);
        Ok(())
    }) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let issued = match services.jwt.issue(user.id, &user.username, user.role, now) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "failed to issue token");
            return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", e.to_string());
        }
    };

    tracing::info!(user_id = %user.id, username = %user.username, "user logged in");

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "token": issued.token,
            "expiresAt": issued.claims.expires_at(),
            "user": user,
        })),
    )
        .into_response()
}

/// POST /api/auth/register
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewUser>,
) -> axum::response::Response {
    if body.role == Some(Role::Administrator) {
        return errors::domain_error_to_response(DomainError::forbidden(
            "administrator accounts cannot be self-registered",
        ));
    }

    let user = match User::create(body, Role::User, Utc::now()) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let user = match services.stores.users.create(user) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(user_id = %user.id, username = %user.username, role = user.role.as_str(), "user registered");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "user registered",
            "user": user,
        })),
    )
        .into_response()
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(Extension(principal): Extension<PrincipalContext>) -> axum::response::Response {
    tracing::info!(user_id = %principal.user_id(), "user logged out");
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "logged out",
        })),
    )
        .into_response()
}

/// GET /api/auth/profile
pub async fn profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.stores.users.get(principal.user_id()) {
        Ok(user) => (StatusCode::OK, Json(serde_json::json!({ "user": user }))).into_response(),
        Err(DomainError::NotFound) => {
            errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "account no longer exists")
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
