//! Report endpoints: thin wrappers that snapshot the stores and hand the
//! records to the aggregator.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use mpsystem_auth::Permission;
use mpsystem_infra::Repository;
use mpsystem_reports::{
    ExportFormat, FilterParams, ReportError, ReportKind, ReportResult, dashboard, filter::parse_date,
    financial_csv, financial_report, inventory_csv, inventory_report, sales_csv, sales_report,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(inventory))
        .route("/sales", get(sales))
        .route("/financial", get(financial))
        .route("/dashboard", get(dashboard_report))
        .route("/export/:type", get(export))
}

fn json_report<T: serde::Serialize>(report: ReportResult<T>) -> axum::response::Response {
    match report {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::report_error_to_response(e),
    }
}

/// GET /api/reports/inventory?category=&status=&search=&dateFrom=&dateTo=
pub async fn inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::REPORTS_READ) {
        return res;
    }
    let Query(params) = match params {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    json_report(inventory_report(&services.stores.items.all(), &params, Utc::now()))
}

/// GET /api/reports/sales?status=&paymentMethod=&dateFrom=&dateTo=&search=
pub async fn sales(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::REPORTS_READ) {
        return res;
    }
    let Query(params) = match params {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    json_report(sales_report(&services.stores.sales.all(), &params, Utc::now()))
}

/// GET /api/reports/financial?dateFrom=&dateTo=
pub async fn financial(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::REPORTS_READ) {
        return res;
    }
    let Query(params) = match params {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    let stores = &services.stores;
    json_report(financial_report(
        &stores.sales.all(),
        &stores.items.all(),
        &stores.expenses.all(),
        &params,
        Utc::now(),
    ))
}

/// GET /api/reports/dashboard?date=YYYY-MM-DD (defaults to today, UTC)
pub async fn dashboard_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::DashboardQuery>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::REPORTS_READ) {
        return res;
    }
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };

    let now = Utc::now();
    let today = match query.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match parse_date("date", raw) {
            Ok(d) => d,
            Err(e) => return errors::report_error_to_response(e),
        },
        None => now.date_naive(),
    };

    match dashboard(
        &services.stores.sales.all(),
        &services.stores.items.all(),
        today,
        now,
    ) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::report_error_to_response(e),
    }
}

/// GET /api/reports/export/:type?format=csv|json plus the usual filters.
pub async fn export(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(kind): Path<String>,
    query: Result<Query<dto::ExportQuery>, QueryRejection>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::REPORTS_READ) {
        return res;
    }
    let (Query(query), Query(params)) = match (query, params) {
        (Ok(q), Ok(p)) => (q, p),
        (Err(e), _) | (_, Err(e)) => return errors::query_rejection(e),
    };

    let kind: ReportKind = match kind.parse() {
        Ok(k) => k,
        Err(e) => return errors::report_error_to_response(e),
    };
    let format: ExportFormat = match query.format.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse() {
            Ok(f) => f,
            Err(e) => return errors::report_error_to_response(e),
        },
        None => ExportFormat::Csv,
    };

    let rendered = render(&services, kind, format, &params);
    match rendered {
        Ok(Rendered::Csv(body)) => {
            tracing::info!(report = kind.as_str(), by = principal.username(), "report exported");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", kind.file_name()),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Ok(Rendered::Json(body)) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::report_error_to_response(e),
    }
}

enum Rendered {
    Csv(String),
    Json(serde_json::Value),
}

fn to_json<T: serde::Serialize>(report: &T) -> ReportResult<serde_json::Value> {
    serde_json::to_value(report).map_err(|e| ReportError::Export(e.to_string()))
}

fn render(
    services: &AppServices,
    kind: ReportKind,
    format: ExportFormat,
    params: &FilterParams,
) -> ReportResult<Rendered> {
    let stores = &services.stores;
    let now = Utc::now();

    match kind {
        ReportKind::Inventory => {
            let report = inventory_report(&stores.items.all(), params, now)?;
            match format {
                ExportFormat::Csv => Ok(Rendered::Csv(inventory_csv(&report)?)),
                ExportFormat::Json => Ok(Rendered::Json(to_json(&report)?)),
            }
        }
        ReportKind::Sales => {
            let report = sales_report(&stores.sales.all(), params, now)?;
            match format {
                ExportFormat::Csv => Ok(Rendered::Csv(sales_csv(&report)?)),
                ExportFormat::Json => Ok(Rendered::Json(to_json(&report)?)),
            }
        }
        ReportKind::Financial => {
            let report = financial_report(
                &stores.sales.all(),
                &stores.items.all(),
                &stores.expenses.all(),
                params,
                now,
            )?;
            match format {
                ExportFormat::Csv => Ok(Rendered::Csv(financial_csv(&report)?)),
                ExportFormat::Json => Ok(Rendered::Json(to_json(&report)?)),
            }
        }
    }
}
