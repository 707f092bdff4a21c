//! Process-start configuration.
//!
//! Everything request-time code needs from the environment is read once
//! here: bind port, database connection string, JWT secret and expiries,
//! and the bcrypt cost factor.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Access token lifetime, minutes.
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime, days.
    pub refresh_token_ttl_days: i64,
    pub bcrypt_cost: u32,
    /// Optional super-admin account seeded at startup.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("MAO_PORT", "8080"),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                let path = std::env::temp_dir().join("mao-portal.db");
                info!("DATABASE_URL not set, using {:?}", path);
                format!("sqlite:{}?mode=rwc", path.display())
            }),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                warn!("JWT_SECRET not set, using an insecure development secret");
                "insecure-dev-secret".to_string()
            }),
            access_token_ttl_minutes: try_load("JWT_ACCESS_TTL_MINUTES", "60"),
            refresh_token_ttl_days: try_load("JWT_REFRESH_TTL_DAYS", "7"),
            bcrypt_cost: try_load("BCRYPT_COST", "10"),
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| warn!("Invalid {key} value: {e}"))
        .expect("Environment misconfigured!")
}
