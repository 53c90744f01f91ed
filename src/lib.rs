use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use redis::Client as RedisClient;
use sqlx::PgPool;

use config::Config;

pub mod cache;
pub mod config;
pub mod database;
pub mod middleware;
pub mod result;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub redis: Arc<RedisClient>,
    pub cookie_key: Key,
}

// SignedCookieJar 提取器需要从应用状态取出签名密钥
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
