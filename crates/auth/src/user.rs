//! User accounts.
//!
//! Accounts carry an argon2 password hash that never leaves the process: it
//! is skipped during serialization.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use mpsystem_core::validation::validate_email;
use mpsystem_core::{DomainError, DomainResult, Entity, Record, UserId};

use crate::Role;
use crate::password::{hash_password, validate_password, verify_password};

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(DomainError::validation(format!(
                "unknown user status '{other}' (expected active or inactive)"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    password_hash: String,
}

/// Input for creating an account (admin-created or self-registration).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
}

impl NewUser {
    /// Admin-created accounts must carry a full profile.
    pub fn require_profile(&self) -> DomainResult<()> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if present(&self.username)
            && present(&self.email)
            && present(&self.password)
            && present(&self.first_name)
            && present(&self.last_name)
        {
            Ok(())
        } else {
            Err(DomainError::validation(
                "username, email, password, firstName and lastName are required",
            ))
        }
    }
}

/// Profile fields an administrator may change. Passwords go through
/// [`User::change_password`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl User {
    /// Validate input, hash the password and build an account.
    ///
    /// `default_role` applies when the input names none.
    pub fn create(input: NewUser, default_role: Role, now: DateTime<Utc>) -> DomainResult<Self> {
        let (Some(username), Some(email), Some(password)) =
            (input.username, input.email, input.password)
        else {
            return Err(DomainError::validation(
                "username, email and password are required",
            ));
        };

        let username = username.trim().to_string();
        let email = email.trim().to_string();
        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&password)?;

        Ok(Self {
            id: UserId::new(0),
            username,
            email,
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            role: input.role.unwrap_or(default_role),
            status: UserStatus::Active,
            last_login: None,
            created_at: now,
            updated_at: now,
            password_hash: hash_password(&password)?,
        })
    }

    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(username) = patch.username {
            let username = username.trim().to_string();
            validate_username(&username)?;
            next.username = username;
        }
        if let Some(email) = patch.email {
            let email = email.trim().to_string();
            validate_email(&email)?;
            next.email = email;
        }
        if let Some(first_name) = patch.first_name {
            next.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            next.last_name = last_name;
        }
        if let Some(role) = patch.role {
            next.role = role;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    /// Replace the password after checking the current one.
    pub fn change_password(
        &mut self,
        current: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if !self.verify_password(current) {
            return Err(DomainError::Unauthorized);
        }
        self.reset_password(new_password, now)
    }

    /// Replace the password without checking the current one.
    pub fn reset_password(&mut self, new_password: &str, now: DateTime<Utc>) -> DomainResult<()> {
        validate_password(new_password)?;
        self.password_hash = hash_password(new_password)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login = Some(now);
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Logged in within `window` before `now`.
    pub fn active_since(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.last_login.is_some_and(|at| at >= now - window)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for User {
    fn assign_id(&mut self, id: UserId) {
        self.id = id;
    }

    fn conflicts_with(&self, other: &Self) -> Option<DomainError> {
        if self.username.eq_ignore_ascii_case(&other.username) {
            return Some(DomainError::conflict(format!(
                "username '{}' is already taken",
                other.username
            )));
        }
        if self.email.eq_ignore_ascii_case(&other.email) {
            return Some(DomainError::conflict(format!(
                "email '{}' is already registered",
                other.email
            )));
        }
        None
    }
}

/// Username: 3..=30 chars of ASCII letters, digits or `_`.
pub fn validate_username(username: &str) -> DomainResult<()> {
    let ok = (3..=30).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(DomainError::validation(
            "username must be 3-30 characters of letters, digits or '_'",
        ))
    }
}
