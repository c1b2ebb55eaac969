use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mpsystem_core::DomainError;
use mpsystem_reports::ReportError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized"),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
    }
}

pub fn report_error_to_response(err: ReportError) -> axum::response::Response {
    match err {
        ReportError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ReportError::Export(msg) => {
            tracing::error!(error = %msg, "report export failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// A query string that does not deserialize is a 400 `validation_error`.
pub fn query_rejection(err: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.body_text())
}

/// Parse a numeric path id, mapping failures to 400 `invalid_id`.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(domain_error_to_response)
}
