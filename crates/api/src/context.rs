use mpsystem_auth::{JwtClaims, Principal, Role};
use mpsystem_core::UserId;

/// Principal context for a request (authenticated identity + role).
///
/// Inserted by the auth middleware from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
    username: String,
    role: Role,
}

impl PrincipalContext {
    pub fn new(user_id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self::new(claims.sub, claims.username.clone(), claims.role)
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Resolve the role's permissions for authorization checks.
    pub fn principal(&self) -> Principal {
        Principal::from_role(self.user_id, self.role)
    }
}
