use std::collections::HashSet;

use crate::db::models::quiz::{CreateQuizRequest, SubmitQuizRequest};
use crate::error::AppError;

pub const MIN_DURATION_MINUTES: i32 = 5;
pub const MAX_DURATION_MINUTES: i32 = 180;
pub const OPTIONS_PER_QUESTION: usize = 4;

pub fn validate_create_quiz(req: &CreateQuizRequest) -> Result<(), AppError> {
    if req.title.trim().is_empty()
        || req.description.trim().is_empty()
        || req.category.trim().is_empty()
        || req.subcategory.trim().is_empty()
        || req.difficulty.trim().is_empty()
    {
        return Err(AppError::validation("Missing required fields"));
    }

    let duration = req
        .duration_minutes
        .ok_or_else(|| AppError::validation("Missing required fields"))?;
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
        return Err(AppError::validation(format!(
            "Invalid duration. Must be between {} and {} minutes.",
            MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
        )));
    }

    if req.questions.is_empty() {
        return Err(AppError::validation("Quiz must have at least one question"));
    }

    for (i, question) in req.questions.iter().enumerate() {
        let in_range = question
            .correct_answer
            .is_some_and(|answer| answer >= 0 && (answer as usize) < OPTIONS_PER_QUESTION);
        if question.question_text.trim().is_empty()
            || question.options.len() != OPTIONS_PER_QUESTION
            || !in_range
        {
            return Err(AppError::validation(format!(
                "Invalid question format at question {}",
                i + 1
            )));
        }
    }

    Ok(())
}

/// Requires a non-negative `time_taken`, which is returned, and rejects
/// answers that name the same question twice.
pub fn validate_submission(req: &SubmitQuizRequest) -> Result<i32, AppError> {
    let time_taken = req
        .time_taken
        .ok_or_else(|| AppError::validation("Missing required field: time_taken"))?;
    if time_taken < 0 {
        return Err(AppError::validation("time_taken cannot be negative"));
    }

    let mut seen = HashSet::with_capacity(req.answers.len());
    for answer in &req.answers {
        if !seen.insert(answer.question_id) {
            return Err(AppError::validation(format!(
                "Question {} answered more than once",
                answer.question_id
            )));
        }
    }

    Ok(time_taken)
}
