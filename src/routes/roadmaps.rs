use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::{ApiResponse, ResponseMeta},
        roadmap::{CreatedRoadmap, ProgressRequest, RoadmapRequest},
    },
    middleware::{auth::AuthUserInfo, extract_request_id},
    services::{ProgressService, RoadmapsService, context::RequestContext},
    validation::JsonBody,
};

pub async fn list_roadmaps(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    auth: AuthUserInfo,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match RoadmapsService::list(&mut conn, auth.id()) {
        Ok(roadmaps) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                total_count: Some(roadmaps.len() as i64),
            };
            let response =
                ApiResponse::success_with_meta(roadmaps, "Roadmaps retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn list_my_roadmaps(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    auth: AuthUserInfo,
) -> impl IntoResponse {
    if let Err(err) = auth.require_mentor() {
        return err.into_response();
    }

    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext::from(&auth);
    match RoadmapsService::list_mine(&mut conn, &ctx) {
        Ok(roadmaps) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                total_count: Some(roadmaps.len() as i64),
            };
            let response =
                ApiResponse::success_with_meta(roadmaps, "Roadmaps retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_roadmap(
    State(state): State<Arc<AppState>>,
    Path(roadmap_id): Path<Uuid>,
    auth: AuthUserInfo,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match RoadmapsService::get_view(&mut conn, roadmap_id, auth.id()) {
        Ok(view) => (
            StatusCode::OK,
            Json(ApiResponse::success(view, "Roadmap retrieved successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_roadmap(
    State(state): State<Arc<AppState>>,
    auth: AuthUserInfo,
    JsonBody(payload): JsonBody<RoadmapRequest>,
) -> impl IntoResponse {
    if let Err(err) = auth.require_mentor() {
        return err.into_response();
    }

    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext::from(&auth);
    match RoadmapsService::create(&mut conn, &ctx, &payload) {
        Ok(roadmap) => (
            StatusCode::CREATED,
            Json(ApiResponse::created(
                CreatedRoadmap {
                    roadmap_id: roadmap.id,
                },
                "Roadmap created successfully",
            )),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_roadmap(
    State(state): State<Arc<AppState>>,
    Path(roadmap_id): Path<Uuid>,
    auth: AuthUserInfo,
    JsonBody(payload): JsonBody<RoadmapRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext::from(&auth);
    match RoadmapsService::update(&mut conn, &ctx, roadmap_id, &payload) {
        Ok(roadmap) => (
            StatusCode::OK,
            Json(ApiResponse::success(roadmap, "Roadmap updated successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_roadmap(
    State(state): State<Arc<AppState>>,
    Path(roadmap_id): Path<Uuid>,
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
    match RoadmapsService::delete(&mut conn, &ctx, roadmap_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::ok("Roadmap deleted successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    Path(step_id): Path<Uuid>,
    auth: AuthUserInfo,
    JsonBody(payload): JsonBody<ProgressRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext::from(&auth);
    match ProgressService::set_progress(&mut conn, &ctx, step_id, &payload.status) {
        Ok(progress) => (
            StatusCode::OK,
            Json(ApiResponse::success(progress, "Progress updated successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
