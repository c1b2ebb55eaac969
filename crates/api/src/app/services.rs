//! Service wiring: record stores, token issuer and process metadata.

use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;

use mpsystem_auth::Hs256Jwt;
use mpsystem_core::DomainResult;
use mpsystem_infra::{Stores, seed_demo};

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppServices {
    pub stores: Stores,
    pub jwt: Arc<Hs256Jwt>,
    pub environment: String,
    started_at: Instant,
}

impl AppServices {
    pub fn new(stores: Stores, jwt: Arc<Hs256Jwt>, environment: impl Into<String>) -> Self {
        Self {
            stores,
            jwt,
            environment: environment.into(),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the services were built.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Build in-memory services, loading demo data when configured.
pub fn build_services(config: &ApiConfig) -> DomainResult<AppServices> {
    let stores = Stores::in_memory();
    if config.seed_demo_data {
        let seeded = seed_demo(&stores)?;
        tracing::info!(
            items = seeded.items,
            sales = seeded.sales,
            users = seeded.users,
            expenses = seeded.expenses,
            "loaded demo data"
        );
    }

    let jwt = Arc::new(Hs256Jwt::new(
        config.jwt_secret.as_bytes(),
        Duration::seconds(config.token_ttl_secs),
    ));

    Ok(AppServices::new(stores, jwt, config.environment.clone()))
}
