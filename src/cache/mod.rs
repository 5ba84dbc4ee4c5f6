pub mod user_cache;

pub use user_cache::UserCache;

use ::redis::{Client, cmd};

use crate::error::AppError;

/// PING against the configured Redis.
pub async fn redis_health_check(redis_client: &Client) -> Result<bool, AppError> {
    let mut conn = redis_client.get_multiplexed_async_connection().await?;

    let pong: String = cmd("PING").query_async(&mut conn).await?;

    Ok(pong == "PONG")
}
