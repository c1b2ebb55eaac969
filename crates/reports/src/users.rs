//! User directory statistics.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use mpsystem_auth::User;

use crate::group::GroupTable;

/// Window for "recently active" users.
pub const RECENT_ACTIVITY_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub recently_active_users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub generated_at: DateTime<Utc>,
    pub summary: UserSummary,
    pub role_stats: GroupTable<u64>,
}

pub fn user_stats(users: &[User], now: DateTime<Utc>) -> UserStats {
    let window = Duration::days(RECENT_ACTIVITY_DAYS);
    let mut summary = UserSummary::default();
    let mut roles: GroupTable<u64> = GroupTable::new();

    for user in users {
        summary.total_users += 1;
        if user.is_active() {
            summary.active_users += 1;
        } else {
            summary.inactive_users += 1;
        }
        if user.active_since(now, window) {
            summary.recently_active_users += 1;
        }
        *roles.entry(user.role.as_str()) += 1;
    }

    UserStats {
        generated_at: now,
        summary,
        role_stats: roles,
    }
}
