use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use mpsystem_auth::Permission;
use mpsystem_core::SaleId;
use mpsystem_infra::Repository;
use mpsystem_reports::{FilterParams, sales_report};
use mpsystem_sales::{NewSale, Sale, SalePatch};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/stats/summary", get(stats_summary))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/:id/complete", post(complete_sale))
        .route("/:id/cancel", post(cancel_sale))
        .route("/:id/refund", post(refund_sale))
}

fn sale_envelope(status: StatusCode, message: &str, sale: &Sale) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({
            "success": true,
            "message": message,
            "sale": sale,
        })),
    )
        .into_response()
}

/// GET /api/sales?status=&paymentMethod=&dateFrom=&dateTo=&search=&page=&limit=
pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::SalesListQuery>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_READ) {
        return res;
    }
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    let filter = match query.filters().parse::<Sale>() {
        Ok(f) => f,
        Err(e) => return errors::report_error_to_response(e),
    };

    let mut sales = services.stores.sales.list(&|s| filter.matches(s));
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let (page, info) = dto::paginate(sales, query.page, query.limit);
    (StatusCode::OK, Json(dto::paginated_json("sales", page, info))).into_response()
}

/// GET /api/sales/:id
pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_READ) {
        return res;
    }
    let id: SaleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.stores.sales.get(id) {
        Ok(sale) => (StatusCode::OK, Json(sale)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/sales
pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewSale>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_WRITE) {
        return res;
    }

    let sale = match Sale::create(body, Utc::now()) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.stores.sales.create(sale) {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, total = %sale.total, by = principal.username(), "sale recorded");
            sale_envelope(StatusCode::CREATED, "sale created", &sale)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// PUT /api/sales/:id
pub async fn update_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<SalePatch>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_WRITE) {
        return res;
    }
    let id: SaleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    let mut patch = Some(body);
    let result = services.stores.sales.update(id, &mut |sale| match patch.take() {
        Some(p) => sale.apply(p, now),
        None => Ok(()),
    });

    match result {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, by = principal.username(), "sale updated");
            sale_envelope(StatusCode::OK, "sale updated", &sale)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /api/sales/:id
pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_WRITE) {
        return res;
    }
    let id: SaleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.stores.sales.delete(id) {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, by = principal.username(), "sale deleted");
            sale_envelope(StatusCode::OK, "sale deleted", &sale)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/sales/:id/complete
pub async fn complete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_WRITE) {
        return res;
    }
    let id: SaleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    match services.stores.sales.update(id, &mut |sale| sale.complete(now)) {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, by = principal.username(), "sale completed");
            sale_envelope(StatusCode::OK, "sale completed", &sale)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/sales/:id/cancel
pub async fn cancel_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CancelSaleRequest>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_WRITE) {
        return res;
    }
    let id: SaleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    let reason = body.reason.unwrap_or_default();
    match services.stores.sales.update(id, &mut |sale| sale.cancel(&reason, now)) {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, by = principal.username(), "sale cancelled");
            sale_envelope(StatusCode::OK, "sale cancelled", &sale)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/sales/:id/refund
pub async fn refund_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::RefundSaleRequest>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_WRITE) {
        return res;
    }
    let id: SaleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    let mut refunded = None;
    let result = services.stores.sales.update(id, &mut |sale| {
        refunded = Some(sale.refund(body.amount, now)?);
        Ok(())
    });

    match result {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, amount = ?refunded, by = principal.username(), "sale refunded");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "sale refunded",
                    "refundAmount": refunded,
                    "sale": sale,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /api/sales/stats/summary
pub async fn stats_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::SALES_READ) {
        return res;
    }

    match sales_report(&services.stores.sales.all(), &FilterParams::default(), Utc::now()) {
        Ok(report) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "summary": report.summary,
                "dailyBreakdown": report.daily_breakdown,
                "paymentMethodBreakdown": report.payment_method_breakdown,
            })),
        )
            .into_response(),
        Err(e) => errors::report_error_to_response(e),
    }
}
