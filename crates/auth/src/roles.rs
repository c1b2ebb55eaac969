use serde::{Deserialize, Serialize};

use mpsystem_core::DomainError;

use crate::Permission;

/// Role assigned to a user account.
///
/// Roles are a closed set; [`Role::permissions`] is the single policy source
/// mapping a role to what it may do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Manager,
    Employee,
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Administrator, Role::Manager, Role::Employee, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::User => "user",
        }
    }

    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Role::Administrator => vec![Permission::WILDCARD],
            Role::Manager => vec![
                Permission::INVENTORY_READ,
                Permission::INVENTORY_WRITE,
                Permission::SALES_READ,
                Permission::SALES_WRITE,
                Permission::REPORTS_READ,
                Permission::EXPENSES_WRITE,
                Permission::USERS_READ,
                Permission::USERS_WRITE,
            ],
            Role::Employee => vec![
                Permission::INVENTORY_READ,
                Permission::INVENTORY_WRITE,
                Permission::SALES_READ,
                Permission::SALES_WRITE,
                Permission::REPORTS_READ,
            ],
            Role::User => vec![
                Permission::INVENTORY_READ,
                Permission::SALES_READ,
                Permission::REPORTS_READ,
            ],
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown role '{s}' (expected administrator, manager, employee or user)"
                ))
            })
    }
}
