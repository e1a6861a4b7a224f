use crate::config::Config;
use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Shared application state. Handlers only ever read from the pool;
/// all mutation of competitive data happens in other subsystems.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
