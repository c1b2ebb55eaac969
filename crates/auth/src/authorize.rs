use std::collections::HashSet;

use thiserror::Error;

use mpsystem_core::UserId;

use crate::{Permission, Role};

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from storage and transport: the API derives it
/// from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn from_role(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            permissions: role.permissions(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a principal for one permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let perms: HashSet<&str> = principal
        .permissions
        .iter()
        .map(|p| p.as_str())
        .collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_grants_everything() {
        let admin = Principal::from_role(UserId::new(1), Role::Administrator);
        assert!(authorize(&admin, &Permission::new("anything.at.all")).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let user = Principal::from_role(UserId::new(9), Role::User);
        assert!(authorize(&user, &Permission::SALES_READ).is_ok());

        let err = authorize(&user, &Permission::SALES_WRITE).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("sales.write".into()));
    }
}
