use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mpsystem_reports::FilterParams;

// -------------------------
// Pagination
// -------------------------

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Cut one page out of `records`. Page and limit below 1 are clamped to 1.
pub fn paginate<T>(records: Vec<T>, page: Option<u64>, limit: Option<u64>) -> (Vec<T>, PageInfo) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let total = records.len() as u64;

    let skip = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let slice = records.into_iter().skip(skip).take(take).collect();

    (
        slice,
        PageInfo {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    )
}

/// `{ <key>: [...], pagination: {...} }`
pub fn paginated_json<T: Serialize>(key: &str, records: Vec<T>, info: PageInfo) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), serde_json::json!(records));
    body.insert("pagination".to_string(), serde_json::json!(info));
    serde_json::Value::Object(body)
}

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl InventoryListQuery {
    pub fn filters(&self) -> FilterParams {
        FilterParams {
            category: self.category.clone(),
            search: self.search.clone(),
            status: self.status.clone(),
            ..FilterParams::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesListQuery {
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl SalesListQuery {
    pub fn filters(&self) -> FilterParams {
        FilterParams {
            status: self.status.clone(),
            payment_method: self.payment_method.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            search: self.search.clone(),
            ..FilterParams::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub role: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CancelSaleRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefundSaleRequest {
    pub amount: Option<Decimal>,
}
