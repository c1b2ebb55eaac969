//! Runtime configuration, read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mpsystem_observability::LogFormat;

pub const DEV_JWT_SECRET: &str = "mpsystem-dev-secret";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub seed_demo_data: bool,
    pub environment: String,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: 86_400,
            seed_demo_data: true,
            environment: "development".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    /// Defaults with the given signing secret.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("BIND_ADDR") {
            config.bind_addr = parse("BIND_ADDR", v)?;
        }
        if let Some(v) = get("PORT") {
            config.port = parse("PORT", v)?;
        }
        if let Some(v) = get("JWT_SECRET") {
            config.jwt_secret = v;
        }
        if let Some(v) = get("TOKEN_TTL_SECS") {
            let ttl: i64 = parse("TOKEN_TTL_SECS", v.clone())?;
            if ttl <= 0 {
                return Err(invalid("TOKEN_TTL_SECS", v, "must be positive"));
            }
            config.token_ttl_secs = ttl;
        }
        if let Some(v) = get("SEED_DEMO_DATA") {
            config.seed_demo_data = parse_bool("SEED_DEMO_DATA", v)?;
        }
        if let Some(v) = get("APP_ENV") {
            config.environment = v;
        }
        if let Some(v) = get("LOG_FORMAT") {
            config.log_format = parse("LOG_FORMAT", v)?;
        }

        Ok(config)
    }

    /// True while the built-in development secret is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn invalid(var: &'static str, value: String, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        value,
        reason: reason.into(),
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        let reason = e.to_string();
        invalid(var, value, reason)
    })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, value, "expected true or false")),
    }
}
