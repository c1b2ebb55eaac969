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
use mpsystem_core::ItemId;
use mpsystem_infra::Repository;
use mpsystem_inventory::{InventoryItem, ItemPatch, NewItem};
use mpsystem_reports::{FilterParams, inventory_report};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/stats/summary", get(stats_summary))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/:id/adjust", post(adjust_stock))
        .route("/:id/archive", post(archive_item))
        .route("/:id/restore", post(restore_item))
}

fn item_envelope(status: StatusCode, message: &str, item: &InventoryItem) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({
            "success": true,
            "message": message,
            "item": item,
        })),
    )
        .into_response()
}

/// GET /api/inventory?category=&search=&status=&page=&limit=
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::InventoryListQuery>, QueryRejection>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_READ) {
        return res;
    }
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    let filter = match query.filters().parse::<InventoryItem>() {
        Ok(f) => f,
        Err(e) => return errors::report_error_to_response(e),
    };

    let items = services.stores.items.list(&|i| filter.matches(i));
    let (page, info) = dto::paginate(items, query.page, query.limit);
    (StatusCode::OK, Json(dto::paginated_json("items", page, info))).into_response()
}

/// GET /api/inventory/:id
pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_READ) {
        return res;
    }
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.stores.items.get(id) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/inventory
pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewItem>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_WRITE) {
        return res;
    }

    let item = match InventoryItem::create(body, Utc::now()) {
        Ok(i) => i,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.stores.items.create(item) {
        Ok(item) => {
            tracing::info!(item_id = %item.id, sku = %item.sku, by = principal.username(), "item created");
            item_envelope(StatusCode::CREATED, "item created", &item)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// PUT /api/inventory/:id
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<ItemPatch>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_WRITE) {
        return res;
    }
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    let mut patch = Some(body);
    let result = services.stores.items.update(id, &mut |item| match patch.take() {
        Some(p) => item.apply(p, now),
        None => Ok(()),
    });

    match result {
        Ok(item) => {
            tracing::info!(item_id = %item.id, by = principal.username(), "item updated");
            item_envelope(StatusCode::OK, "item updated", &item)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /api/inventory/:id
pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_WRITE) {
        return res;
    }
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.stores.items.delete(id) {
        Ok(item) => {
            tracing::info!(item_id = %item.id, by = principal.username(), "item deleted");
            item_envelope(StatusCode::OK, "item deleted", &item)
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/inventory/:id/adjust
pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_WRITE) {
        return res;
    }
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    let reason = body.reason.unwrap_or_else(|| "manual adjustment".to_string());
    let mut change = None;
    let result = services.stores.items.update(id, &mut |item| {
        change = Some(item.adjust_quantity(body.delta, reason.clone(), now)?);
        Ok(())
    });

    match (result, change) {
        (Ok(item), Some(change)) => {
            tracing::info!(
                item_id = %item.id,
                delta = change.change,
                quantity = change.new_quantity,
                by = principal.username(),
                "stock adjusted"
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "item": item,
                    "change": change,
                })),
            )
                .into_response()
        }
        (Err(e), _) => errors::domain_error_to_response(e),
        (Ok(_), None) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "adjustment was not recorded",
        ),
    }
}

/// POST /api/inventory/:id/archive
pub async fn archive_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_WRITE) {
        return res;
    }
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    match services.stores.items.update(id, &mut |item| item.archive(now)) {
        Ok(item) => item_envelope(StatusCode::OK, "item archived", &item),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /api/inventory/:id/restore
pub async fn restore_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_WRITE) {
        return res;
    }
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let now = Utc::now();
    match services.stores.items.update(id, &mut |item| item.restore(now)) {
        Ok(item) => item_envelope(StatusCode::OK, "item restored", &item),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /api/inventory/stats/summary
pub async fn stats_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(res) = require(&principal, Permission::INVENTORY_READ) {
        return res;
    }

    match inventory_report(&services.stores.items.all(), &FilterParams::default(), Utc::now()) {
        Ok(report) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "summary": report.summary,
                "categoryBreakdown": report.category_breakdown,
            })),
        )
            .into_response(),
        Err(e) => errors::report_error_to_response(e),
    }
}
