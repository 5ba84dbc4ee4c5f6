use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tokio::task;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::{LoginRequest, SignupRequest},
    },
    error::AppError,
    middleware::auth::AuthUserInfo,
    services::{AuthService, context::RequestContext},
    validation::ValidatedJson,
};

// Password hashing is CPU bound, so signup and login run off the async workers.

pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> impl IntoResponse {
    let pool = state.db.clone();
    let cost = state.config.auth().bcrypt_cost;

    let result = task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        AuthService::signup(&mut conn, &payload, cost)
    })
    .await;

    match result {
        Ok(Ok(user)) => (
            StatusCode::CREATED,
            Json(ApiResponse::created(user, "User registered successfully")),
        )
            .into_response(),
        Ok(Err(err)) => err.into_response(),
        Err(e) => AppError::internal(format!("Signup task failed: {}", e)).into_response(),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    let pool = state.db.clone();
    let tokens = state.tokens.clone();

    let result = task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        AuthService::login(&mut conn, &payload, &tokens)
    })
    .await;

    match result {
        Ok(Ok(login)) => (
            StatusCode::OK,
            Json(ApiResponse::success(login, "Login successful")),
        )
            .into_response(),
        Ok(Err(err)) => err.into_response(),
        Err(e) => AppError::internal(format!("Login task failed: {}", e)).into_response(),
    }
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUserInfo,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext::from(&auth);
    match AuthService::profile(&mut conn, &ctx) {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "Profile retrieved successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
