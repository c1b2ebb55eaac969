//! `mpsystem-auth`: users, passwords, roles and JWTs.
//!
//! No HTTP or storage concerns live here.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{AuthzError, Principal, authorize};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256Jwt, IssuedToken, JwtValidator, TokenError, TokenIssuer};
pub use permissions::Permission;
pub use roles::Role;
pub use user::{NewUser, User, UserPatch, UserStatus};
