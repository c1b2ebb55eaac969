//! Shared field validation.

use crate::error::{DomainError, DomainResult};

/// Loose `local@domain.tld` check: one `@`, no whitespace, a dot in the domain.
pub fn validate_email(email: &str) -> DomainResult<()> {
    let invalid = || DomainError::validation(format!("invalid email address '{email}'"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}
