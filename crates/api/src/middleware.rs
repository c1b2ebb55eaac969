use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use mpsystem_auth::JwtValidator;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Ok(t) => t,
        Err(msg) => return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", msg),
    };

    let claims = match state.jwt.validate(token, Utc::now()) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid or expired token");
        }
    };

    req.extensions_mut().insert(PrincipalContext::from_claims(&claims));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("access token required")?;

    let header = header.to_str().map_err(|_| "malformed authorization header")?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or("authorization header must use the Bearer scheme")?;

    let token = header.trim();
    if token.is_empty() {
        return Err("access token required");
    }

    Ok(token)
}

/// One log line per request: method, path, status and latency.
pub async fn request_log_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    if res.status().is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status, latency_ms, "request");
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
        assert!(extract_bearer(&headers("Basic Zm9vOmJhcg==")).is_err());
        assert!(extract_bearer(&headers("Bearer   ")).is_err());
    }
}
