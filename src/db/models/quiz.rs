use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::enums::QuizStatus;

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::quizzes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub difficulty: String,
    pub duration_minutes: i32,
    pub mentor_id: Uuid,
    pub status: QuizStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quizzes)]
pub struct NewQuiz<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
    pub difficulty: &'a str,
    pub duration_minutes: i32,
    pub mentor_id: Uuid,
    pub status: QuizStatus,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Clone, Debug)]
#[diesel(belongs_to(Quiz))]
#[diesel(table_name = crate::schema::quiz_questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_text: String,
    pub options: serde_json::Value,
    pub correct_answer: i32,
    pub explanation: String,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quiz_questions)]
pub struct NewQuizQuestion<'a> {
    pub quiz_id: Uuid,
    pub question_text: &'a str,
    pub options: serde_json::Value,
    pub correct_answer: i32,
    pub explanation: &'a str,
    pub position: i32,
}

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::quiz_attempts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuizAttempt {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub score: f64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_taken: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quiz_attempts)]
pub struct NewQuizAttempt {
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub score: f64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_taken: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quiz_answers)]
pub struct NewQuizAnswer {
    pub attempt_id: Uuid,
    pub question_id: Uuid,
    pub selected_option: i32,
    pub is_correct: bool,
}

/// The answer key of one question, as loaded for grading.
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::quiz_questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnswerKey {
    pub id: Uuid,
    pub correct_answer: i32,
    pub explanation: String,
}

// Request DTOs
#[derive(Deserialize, Clone, Debug, Default)]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub difficulty: String,
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct QuestionInput {
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Option<i32>,
    pub explanation: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    pub selected_option: i32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    pub time_taken: Option<i32>,
}

// Response DTOs
#[derive(Serialize, Debug)]
pub struct CreatedQuiz {
    #[serde(rename = "quizId")]
    pub quiz_id: Uuid,
}

#[derive(Serialize, Clone, Debug)]
pub struct QuestionView {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub mentor_name: String,
    pub questions: Vec<QuestionView>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GradedAnswer {
    pub question_id: Uuid,
    pub selected_option: i32,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GradedResult {
    pub score: f64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_taken: i32,
    pub answers: Vec<GradedAnswer>,
}

#[derive(Serialize, Debug)]
pub struct StudentQuizSummary {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub mentor_name: String,
    pub total_questions: i64,
    pub attempts: i64,
    pub best_score: Option<f64>,
}

#[derive(Serialize, Debug)]
pub struct MentorQuizSummary {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub total_attempts: i64,
    pub avg_score: Option<f64>,
}
