use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;

use mpsystem_accounting::{Expense, NewExpense};
use mpsystem_auth::Permission;
use mpsystem_infra::Repository;
use mpsystem_reports::{DateRange, ReportResult, filter::parse_date};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_expenses).post(create_expense))
}

fn date_range(query: &dto::ExpenseListQuery) -> ReportResult<DateRange> {
    let parse = |field: &str, value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_date(field, s))
            .transpose()
    };
    Ok(DateRange {
        from: parse("dateFrom", &query.date_from)?,
        to: parse("dateTo", &query.date_to)?,
    })
}

/// GET /api/expenses?category=&dateFrom=&dateTo=
pub async fn list_expenses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::ExpenseListQuery>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::REPORTS_READ) {
        return res;
    }
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    let range = match date_range(&query) {
        Ok(r) => r,
        Err(e) => return errors::report_error_to_response(e),
    };
    let category = query
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let mut expenses = services.stores.expenses.list(&|e: &Expense| {
        range.contains(e.date)
            && category
                .as_deref()
                .is_none_or(|c| e.category.to_lowercase().contains(c))
    });
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    let total: Decimal = expenses.iter().map(|e| e.amount).sum();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "expenses": expenses,
            "total": total,
        })),
    )
        .into_response()
}

/// POST /api/expenses
pub async fn create_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewExpense>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::EXPENSES_WRITE) {
        return res;
    }

    let expense = match Expense::create(body, Utc::now()) {
        Ok(e) => e,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.stores.expenses.create(expense) {
        Ok(expense) => {
            tracing::info!(
                expense_id = %expense.id,
                category = %expense.category,
                amount = %expense.amount,
                by = principal.username(),
                "expense booked"
            );
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "success": true,
                    "message": "expense created",
                    "expense": expense,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
