use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::Utc;

use mpsystem_auth::{NewUser, Permission, Role, User, UserPatch};
use mpsystem_core::{DomainError, UserId};
use mpsystem_infra::Repository;
use mpsystem_reports::user_stats;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/stats/summary", get(stats_summary))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/password", put(change_password))
}

fn matches_query(user: &User, query: &dto::UserListQuery) -> bool {
    let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);

    if let Some(role) = present(&query.role) {
        if user.role.as_str() != role {
            return false;
        }
    }
    if let Some(status) = present(&query.status) {
        if user.status.as_str() != status {
            return false;
        }
    }
    if let Some(needle) = present(&query.search) {
        let hit = [&user.username, &user.email, &user.first_name, &user.last_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }
    true
}

/// GET /api/users?role=&status=&search=&page=&limit=
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::UserListQuery>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::USERS_READ) {
        return res;
    }
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };

    let mut users = services.stores.users.list(&|u| matches_query(u, &query));
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let (page, info) = dto::paginate(users, query.page, query.limit);
    (StatusCode::OK, Json(dto::paginated_json("users", page, info))).into_response()
}

/// GET /api/users/:id
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::USERS_READ) {
        return res;
    }
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.stores.users.get(id) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/users
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewUser>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::USERS_WRITE) {
        return res;
    }
    if let Err(e) = body.require_profile() {
        return errors::domain_error_to_response(e);
    }

    let user = match User::create(body, Role::Employee, Utc::now()) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let user = match services.stores.users.create(user) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(user_id = %user.id, username = %user.username, by = principal.username(), "user created");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "user created",
            "user": user,
        })),
    )
        .into_response()
}

/// PUT /api/users/:id
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<UserPatch>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::USERS_WRITE) {
        return res;
    }
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    let mut patch = Some(body);
    let result = services.stores.users.update(id, &mut |u| match patch.take() {
        Some(p) => u.apply(p, now),
        None => Ok(()),
    });

    match result {
        Ok(user) => {
            tracing::info!(user_id = %user.id, by = principal.username(), "user updated");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "user updated",
                    "user": user,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /api/users/:id
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::USERS_WRITE) {
        return res;
    }
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let not_admin = |user: &User| {
        if user.role == Role::Administrator {
            Err(DomainError::forbidden("administrator accounts cannot be deleted"))
        } else {
            Ok(())
        }
    };

    match services.stores.users.delete_if(id, &not_admin) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, by = principal.username(), "user deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "user deleted",
                    "user": user,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// PUT /api/users/:id/password
///
/// Allowed for the account owner or holders of `users.write`; the current
/// password is checked either way.
pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    if principal.user_id() != id {
        if let Err(res) = require(&principal, Permission::USERS_WRITE) {
            return res;
        }
    }

    let (Some(current), Some(new_password)) = (body.current_password, body.new_password) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "currentPassword and newPassword are required",
        );
    };

    let now = Utc::now();
    match services
        .stores
        .users
        .update(id, &mut |u| u.change_password(&current, &new_password, now))
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, by = principal.username(), "password changed");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "password updated",
                })),
            )
                .into_response()
        }
        Err(DomainError::Unauthorized) => errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "current password is incorrect",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /api/users/stats/summary
pub async fn stats_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::USERS_READ) {
        return res;
    }

    let stats = user_stats(&services.stores.users.all(), Utc::now());
    (StatusCode::OK, Json(stats)).into_response()
}
