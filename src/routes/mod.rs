pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod quizzes;
pub mod roadmaps;

use crate::AppState;
use crate::middleware::auth::auth_middleware;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

/// Public routes plus the bearer-protected API.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health_check))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/auth/profile", get(auth::get_profile))
        .route(
            "/roadmaps",
            get(roadmaps::list_roadmaps).post(roadmaps::create_roadmap),
        )
        .route("/roadmaps/mine", get(roadmaps::list_my_roadmaps))
        .route(
            "/roadmaps/:roadmap_id",
            get(roadmaps::get_roadmap)
                .put(roadmaps::update_roadmap)
                .delete(roadmaps::delete_roadmap),
        )
        .route(
            "/roadmaps/progress/:step_id",
            post(roadmaps::update_progress),
        )
        .route("/quizzes", post(quizzes::create_quiz))
        .route("/quizzes/student", get(quizzes::list_student_quizzes))
        .route("/quizzes/mentor", get(quizzes::list_mentor_quizzes))
        .route("/quizzes/:quiz_id", get(quizzes::get_quiz))
        .route("/quizzes/:quiz_id/submit", post(quizzes::submit_quiz))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route(
            "/leaderboard/student/:student_id",
            get(leaderboard::get_student_ranking),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    public_routes.merge(protected_routes)
}
