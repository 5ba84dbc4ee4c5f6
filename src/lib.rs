pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::cache::UserCache;
use crate::config::Config;
use crate::db::DbPool;
use crate::middleware::auth::TokenService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub tokens: TokenService,
    pub user_cache: UserCache,
}

impl AppState {
    pub fn new(db: DbPool, redis: redis::Client, config: Config) -> Self {
        let tokens = TokenService::new(&config.auth());
        let user_cache = UserCache::new(redis.clone(), &config.cache());
        Self {
            db,
            redis,
            config: Arc::new(config),
            tokens,
            user_cache,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level_filter = match logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => logging.level.as_str(),
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt().json().with_env_filter(filter).init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}
