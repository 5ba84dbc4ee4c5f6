use redis::AsyncCommands;
use uuid::Uuid;

use crate::config::CacheConfig;
use crate::db::models::auth::AuthUser;
use crate::error::AppError;

const USER_CACHE_PREFIX: &str = "user:";

/// Read-through cache of authenticated users, keyed by id.
#[derive(Clone)]
pub struct UserCache {
    redis_client: redis::Client,
    ttl: u64,
}

impl UserCache {
    pub fn new(redis_client: redis::Client, config: &CacheConfig) -> Self {
        Self {
            redis_client,
            ttl: config.user_ttl,
        }
    }

    fn key(user_id: Uuid) -> String {
        format!("{}{}", USER_CACHE_PREFIX, user_id)
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.redis_client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    pub async fn cache_user(&self, user: &AuthUser) -> Result<(), AppError> {
        let mut conn = self.get_connection().await?;

        let user_json = serde_json::to_string(user)
            .map_err(|e| AppError::Internal(format!("Failed to serialize user: {}", e)))?;

        let _: () = conn
            .set_ex(Self::key(user.id), user_json, self.ttl)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to cache user: {}", e)))?;

        Ok(())
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<AuthUser>, AppError> {
        let mut conn = self.get_connection().await?;

        let user_json: Option<String> = conn
            .get(Self::key(user_id))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get cached user: {}", e)))?;

        match user_json {
            Some(json) => {
                let user = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Failed to deserialize user: {}", e))
                })?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
