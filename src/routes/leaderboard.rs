use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::api::{ApiResponse, ResponseMeta},
    middleware::extract_request_id,
    services::LeaderboardService,
};

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub search: Option<String>,
}

/// `GET /leaderboard?search=`. Ranks are computed over all students before
/// `search` filters the rows, so a matched student keeps their global rank
/// rather than being renumbered within the matches.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match LeaderboardService::leaderboard(&mut conn, params.search.as_deref()) {
        Ok(entries) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                total_count: Some(entries.len() as i64),
            };
            let response =
                ApiResponse::success_with_meta(entries, "Leaderboard retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_student_ranking(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match LeaderboardService::student_ranking(&mut conn, student_id) {
        Ok(ranking) => (
            StatusCode::OK,
            Json(ApiResponse::success(ranking, "Student ranking retrieved successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
