// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Default identity of the designated system account.
/// The account is excluded from every competitive leaderboard.
const DEFAULT_SYSTEM_ACCOUNT_ID: i64 = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub rust_log: String,

    /// Reserved service-account user id, never shown on leaderboards.
    pub system_account_id: i64,

    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let system_account_id = env::var("SYSTEM_ACCOUNT_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SYSTEM_ACCOUNT_ID);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        Self {
            database_url,
            jwt_secret,
            rust_log,
            system_account_id,
            port,
        }
    }
}
