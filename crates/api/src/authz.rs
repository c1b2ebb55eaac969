//! API-side authorization guard.
//!
//! Handlers call this before touching a store; domain crates and infra stay
//! auth-agnostic.

use axum::http::StatusCode;
use axum::response::Response;

use mpsystem_auth::{AuthzError, Permission, authorize};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Check that the request's principal holds every permission in `required`.
pub fn authorize_request(
    principal: &PrincipalContext,
    required: &[Permission],
) -> Result<(), AuthzError> {
    let principal = principal.principal();
    for perm in required {
        authorize(&principal, perm)?;
    }
    Ok(())
}

/// [`authorize_request`] for one permission, mapped to a 403 response.
pub fn require(principal: &PrincipalContext, permission: Permission) -> Result<(), Response> {
    authorize_request(principal, &[permission]).map_err(|e| {
        tracing::debug!(user = principal.username(), error = %e, "permission denied");
        errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string())
    })
}
