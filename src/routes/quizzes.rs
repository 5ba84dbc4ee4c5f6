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
        quiz::{CreateQuizRequest, CreatedQuiz, SubmitQuizRequest},
    },
    middleware::{auth::AuthUserInfo, extract_request_id},
    services::{QuizzesService, context::RequestContext},
    validation::JsonBody,
};

pub async fn list_student_quizzes(
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

    let ctx = RequestContext::from(&auth);
    match QuizzesService::list_for_student(&mut conn, &ctx) {
        Ok(quizzes) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                total_count: Some(quizzes.len() as i64),
            };
            let response =
                ApiResponse::success_with_meta(quizzes, "Quizzes retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn list_mentor_quizzes(
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
    match QuizzesService::list_for_mentor(&mut conn, &ctx) {
        Ok(quizzes) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                total_count: Some(quizzes.len() as i64),
            };
            let response =
                ApiResponse::success_with_meta(quizzes, "Quizzes retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    auth: AuthUserInfo,
    JsonBody(payload): JsonBody<CreateQuizRequest>,
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
    match QuizzesService::create(&mut conn, &ctx, &payload) {
        Ok(quiz) => (
            StatusCode::CREATED,
            Json(ApiResponse::created(
                CreatedQuiz { quiz_id: quiz.id },
                "Quiz created successfully",
            )),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
    _auth: AuthUserInfo,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match QuizzesService::get(&mut conn, quiz_id) {
        Ok(quiz) => (
            StatusCode::OK,
            Json(ApiResponse::success(quiz, "Quiz retrieved successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
    auth: AuthUserInfo,
    JsonBody(payload): JsonBody<SubmitQuizRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext::from(&auth);
    match QuizzesService::submit(&mut conn, &ctx, quiz_id, &payload) {
        Ok(result) => (
            StatusCode::OK,
            Json(ApiResponse::success(result, "Quiz submitted successfully")),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
