pub mod auth;
pub mod progress;
pub mod quizzes;
pub mod roadmaps;
