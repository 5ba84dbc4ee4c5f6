use crate::{
    AppState,
    config::AuthConfig,
    db::{enums::UserRole, models::AuthUser, repositories::auth::AuthRepo},
    error::AppError,
    middleware::logger::RequestActor,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub role: UserRole,
    pub username: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expires_in: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in: config.access_token_expires_in,
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::internal(format!("System clock error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            role: user.role,
            username: user.username.clone(),
            exp: now + self.expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?;
        Ok(token)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// The authenticated caller, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUserInfo {
    pub user: AuthUser,
}

impl AuthUserInfo {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    pub fn require_mentor(&self) -> Result<(), AppError> {
        if self.user.is_mentor() || self.user.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Mentor access required"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUserInfo
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUserInfo>()
            .cloned()
            .ok_or_else(|| AppError::auth("Authentication required"))
    }
}

fn bearer_token(request: &Request<axum::body::Body>) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return AppError::auth("Missing bearer token").into_response();
    };

    let claims = match state.tokens.verify_token(&token) {
        Ok(claims) => claims,
        Err(_) => return AppError::auth("Invalid or expired token").into_response(),
    };

    let user = match resolve_user(&state, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return AppError::auth("User no longer exists").into_response(),
        Err(err) => return err.into_response(),
    };

    let actor = RequestActor {
        user_id: user.id,
        role: user.role,
    };
    request.extensions_mut().insert(AuthUserInfo { user });

    let mut response = next.run(request).await;
    response.extensions_mut().insert(actor);
    response
}

/// Cache first, then the users table. Cache failures fall through to the
/// database.
async fn resolve_user(state: &AppState, user_id: Uuid) -> Result<Option<AuthUser>, AppError> {
    match state.user_cache.get_user(user_id).await {
        Ok(Some(user)) => return Ok(Some(user)),
        Ok(None) => {}
        Err(err) => warn!(user_id = %user_id, error = %err, "User cache lookup failed"),
    }

    let pool = state.db.clone();
    let user = tokio::task::spawn_blocking(move || -> Result<Option<AuthUser>, AppError> {
        let mut conn = pool.get()?;
        Ok(AuthRepo::find_by_id(&mut conn, user_id)?.map(AuthUser::from))
    })
    .await
    .map_err(|e| AppError::internal(format!("User lookup task failed: {}", e)))??;

    if let Some(ref user) = user {
        if let Err(err) = state.user_cache.cache_user(user).await {
            warn!(user_id = %user_id, error = %err, "Failed to cache user");
        }
    }

    Ok(user)
}
