use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// One student's attempt aggregates as computed by the database. Scores are
/// `None` for students without attempts.
#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct StudentScores {
    pub student_id: Uuid,
    pub username: String,
    pub avg_score: Option<f64>,
    pub best_score: Option<f64>,
    pub quizzes_taken: i64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub username: String,
    pub score: f64,
    pub rank: i64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StudentRanking {
    pub id: Uuid,
    pub username: String,
    pub avg_score: f64,
    pub quizzes_taken: i64,
    pub best_score: Option<f64>,
    pub rank: i64,
}
