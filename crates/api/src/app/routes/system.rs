use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use crate::app::services::AppServices;

/// GET /api/health (public)
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "OK",
            "timestamp": Utc::now(),
            "uptime": services.uptime_secs(),
            "environment": services.environment,
        })),
    )
        .into_response()
}
