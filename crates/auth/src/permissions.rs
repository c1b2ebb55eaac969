use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "inventory.read").
/// The wildcard permission `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission::from_static("*");

    pub const INVENTORY_READ: Permission = Permission::from_static("inventory.read");
    pub const INVENTORY_WRITE: Permission = Permission::from_static("inventory.write");
    pub const SALES_READ: Permission = Permission::from_static("sales.read");
    pub const SALES_WRITE: Permission = Permission::from_static("sales.write");
    pub const REPORTS_READ: Permission = Permission::from_static("reports.read");
    pub const EXPENSES_WRITE: Permission = Permission::from_static("expenses.write");
    pub const USERS_READ: Permission = Permission::from_static("users.read");
    pub const USERS_WRITE: Permission = Permission::from_static("users.write");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
