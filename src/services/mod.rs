pub mod access;
pub mod auth_service;
pub mod context;
pub mod grading;
pub mod leaderboard_service;
pub mod progress_service;
pub mod progression;
pub mod quizzes_service;
pub mod roadmaps_service;

pub use auth_service::AuthService;
pub use leaderboard_service::LeaderboardService;
pub use progress_service::ProgressService;
pub use quizzes_service::QuizzesService;
pub use roadmaps_service::RoadmapsService;
