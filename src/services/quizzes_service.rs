use std::collections::HashMap;

use diesel::prelude::*;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::enums::QuizStatus,
    db::models::quiz::{
        CreateQuizRequest, GradedResult, MentorQuizSummary, NewQuiz, NewQuizAnswer,
        NewQuizAttempt, NewQuizQuestion, QuestionView, Quiz, QuizDetail, StudentQuizSummary,
        SubmitQuizRequest,
    },
    db::repositories::quizzes::QuizRepo,
    error::AppError,
    services::{context::RequestContext, grading},
    validation::quiz::{validate_create_quiz, validate_submission},
};

pub struct QuizzesService;

impl QuizzesService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateQuizRequest,
    ) -> Result<Quiz, AppError> {
        validate_create_quiz(req)?;
        let duration = req
            .duration_minutes
            .ok_or_else(|| AppError::validation("Missing required fields"))?;

        let quiz = conn.transaction::<_, AppError, _>(|conn| {
            let new_quiz = NewQuiz {
                title: &req.title,
                description: &req.description,
                category: &req.category,
                subcategory: &req.subcategory,
                difficulty: &req.difficulty,
                duration_minutes: duration,
                mentor_id: ctx.user_id,
                status: QuizStatus::Active,
            };
            let quiz = QuizRepo::insert_quiz(conn, &new_quiz)?;

            let questions: Vec<NewQuizQuestion> = req
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| NewQuizQuestion {
                    quiz_id: quiz.id,
                    question_text: &q.question_text,
                    options: serde_json::Value::from(q.options.clone()),
                    correct_answer: q.correct_answer.unwrap_or_default(),
                    explanation: q.explanation.as_deref().unwrap_or(""),
                    position: i as i32,
                })
                .collect();
            QuizRepo::insert_questions(conn, &questions)?;

            Ok(quiz)
        })?;

        info!(quiz_id = %quiz.id, mentor_id = %ctx.user_id, questions = req.questions.len(), "Quiz created");
        Ok(quiz)
    }

    /// Quiz details for taking the quiz; correct answers are not included.
    pub fn get(conn: &mut PgConnection, quiz_id: Uuid) -> Result<QuizDetail, AppError> {
        let (quiz, mentor_name) = QuizRepo::find_with_mentor(conn, quiz_id)?
            .ok_or_else(|| AppError::not_found("Quiz"))?;

        let questions = QuizRepo::list_questions(conn, quiz_id)?
            .into_iter()
            .map(|q| QuestionView {
                id: q.id,
                question_text: q.question_text,
                // Stored options that are not a string list render as empty.
                options: serde_json::from_value(q.options).unwrap_or_default(),
            })
            .collect();

        Ok(QuizDetail {
            quiz,
            mentor_name,
            questions,
        })
    }

    /// Grades a submission and records the attempt with one answer row per
    /// submitted answer, all in one transaction.
    pub fn submit(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        quiz_id: Uuid,
        req: &SubmitQuizRequest,
    ) -> Result<GradedResult, AppError> {
        let time_taken = validate_submission(req)?;

        let result = conn.transaction::<_, AppError, _>(|conn| {
            if !QuizRepo::exists(conn, quiz_id)? {
                return Err(AppError::not_found("Quiz"));
            }

            let keys = QuizRepo::answer_keys(conn, quiz_id)?;
            let result = grading::grade(&keys, &req.answers, time_taken);

            let attempt = QuizRepo::insert_attempt(
                conn,
                &NewQuizAttempt {
                    quiz_id,
                    student_id: ctx.user_id,
                    score: result.score,
                    total_questions: result.total_questions,
                    correct_answers: result.correct_answers,
                    time_taken: result.time_taken,
                },
            )?;

            let answers: Vec<NewQuizAnswer> = result
                .answers
                .iter()
                .map(|a| NewQuizAnswer {
                    attempt_id: attempt.id,
                    question_id: a.question_id,
                    selected_option: a.selected_option,
                    is_correct: a.is_correct,
                })
                .collect();
            QuizRepo::insert_answers(conn, &answers)?;

            Ok(result)
        })?;

        info!(
            quiz_id = %quiz_id,
            student_id = %ctx.user_id,
            score = result.score,
            correct = result.correct_answers,
            total = result.total_questions,
            "Quiz submitted"
        );
        Ok(result)
    }

    /// Active quizzes with the caller's attempt count and best score.
    pub fn list_for_student(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<StudentQuizSummary>, AppError> {
        let quizzes = QuizRepo::list_active_with_mentor(conn)?;
        let quiz_ids: Vec<Uuid> = quizzes.iter().map(|(q, _)| q.id).collect();

        let question_counts: HashMap<Uuid, i64> =
            QuizRepo::question_counts(conn, &quiz_ids)?.into_iter().collect();

        let mut attempts: HashMap<Uuid, (i64, f64)> = HashMap::new();
        for (quiz_id, score) in QuizRepo::attempt_scores(conn, &quiz_ids, Some(ctx.user_id))? {
            let entry = attempts.entry(quiz_id).or_insert((0, f64::MIN));
            entry.0 += 1;
            entry.1 = entry.1.max(score);
        }

        Ok(quizzes
            .into_iter()
            .map(|(quiz, mentor_name)| {
                let (count, best) = attempts.get(&quiz.id).copied().unwrap_or((0, f64::MIN));
                StudentQuizSummary {
                    total_questions: question_counts.get(&quiz.id).copied().unwrap_or(0),
                    attempts: count,
                    best_score: (count > 0).then_some(best),
                    mentor_name,
                    quiz,
                }
            })
            .collect())
    }

    /// The caller's quizzes with attempt totals and the mean score.
    pub fn list_for_mentor(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<MentorQuizSummary>, AppError> {
        let quizzes = QuizRepo::list_by_mentor(conn, ctx.user_id)?;
        let quiz_ids: Vec<Uuid> = quizzes.iter().map(|q| q.id).collect();

        let mut totals: HashMap<Uuid, (i64, f64)> = HashMap::new();
        for (quiz_id, score) in QuizRepo::attempt_scores(conn, &quiz_ids, None)? {
            let entry = totals.entry(quiz_id).or_default();
            entry.0 += 1;
            entry.1 += score;
        }

        Ok(quizzes
            .into_iter()
            .map(|quiz| {
                let (count, sum) = totals.get(&quiz.id).copied().unwrap_or_default();
                MentorQuizSummary {
                    total_attempts: count,
                    avg_score: (count > 0).then(|| sum / count as f64),
                    quiz,
                }
            })
            .collect())
    }
}
