use std::collections::HashMap;

use uuid::Uuid;

use crate::db::models::quiz::{AnswerKey, GradedAnswer, GradedResult, SubmittedAnswer};

/// Scores a submission against the quiz's answer key.
///
/// Answers are matched by `question_id`; an answer naming a question outside
/// the quiz is graded incorrect. Questions without an answer count against
/// the score, so `score = correct / questions * 100`. A quiz without
/// questions scores 0.
pub fn grade(keys: &[AnswerKey], answers: &[SubmittedAnswer], time_taken: i32) -> GradedResult {
    let by_id: HashMap<Uuid, &AnswerKey> = keys.iter().map(|key| (key.id, key)).collect();

    let graded: Vec<GradedAnswer> = answers
        .iter()
        .map(|answer| {
            let key = by_id.get(&answer.question_id);
            GradedAnswer {
                question_id: answer.question_id,
                selected_option: answer.selected_option,
                is_correct: key.is_some_and(|k| k.correct_answer == answer.selected_option),
                explanation: key.map(|k| k.explanation.clone()),
            }
        })
        .collect();

    let total_questions = keys.len() as i32;
    let correct_answers = graded.iter().filter(|a| a.is_correct).count() as i32;
    let score = if total_questions == 0 {
        0.0
    } else {
        f64::from(correct_answers) / f64::from(total_questions) * 100.0
    };

    GradedResult {
        score,
        total_questions,
        correct_answers,
        time_taken,
        answers: graded,
    }
}
