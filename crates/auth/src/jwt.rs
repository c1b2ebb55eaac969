//! HS256 bearer tokens.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use mpsystem_core::UserId;

use crate::{JwtClaims, Role, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(String),

    #[error("malformed or forged token: {0}")]
    Decode(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies bearer tokens presented to the API.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Mints bearer tokens after a successful login.
pub trait TokenIssuer: Send + Sync {
    fn issue(
        &self,
        user_id: UserId,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: JwtClaims,
}

/// Symmetric-key issuer and validator.
#[derive(Clone)]
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256Jwt {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn validation() -> Validation {
        // Time checks run in `validate_claims` against the caller's clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        validation
    }
}

impl TokenIssuer for Hs256Jwt {
    fn issue(
        &self,
        user_id: UserId,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let iat = now.timestamp();
        let claims = JwtClaims {
            sub: user_id,
            username: username.to_string(),
            role,
            iat,
            exp: iat + self.ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }
}

impl JwtValidator for Hs256Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding, &Self::validation())
            .map_err(|e| TokenError::Decode(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
