use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{QuizStatus, UserRole};
use crate::db::models::leaderboard::StudentScores;
use crate::db::models::quiz::{
    AnswerKey, NewQuiz, NewQuizAnswer, NewQuizAttempt, NewQuizQuestion, Quiz, QuizAttempt,
    QuizQuestion,
};
use crate::schema::{quiz_answers, quiz_attempts, quiz_questions, quizzes, users};

pub struct QuizRepo;

impl QuizRepo {
    pub fn insert_quiz(
        conn: &mut PgConnection,
        new_quiz: &NewQuiz,
    ) -> Result<Quiz, diesel::result::Error> {
        diesel::insert_into(quizzes::table)
            .values(new_quiz)
            .returning(Quiz::as_returning())
            .get_result(conn)
    }

    pub fn insert_questions(
        conn: &mut PgConnection,
        questions: &[NewQuizQuestion],
    ) -> Result<usize, diesel::result::Error> {
        if questions.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(quiz_questions::table)
            .values(questions)
            .execute(conn)
    }

    pub fn exists(conn: &mut PgConnection, quiz_id: Uuid) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(
            quizzes::table.filter(quizzes::id.eq(quiz_id)),
        ))
        .get_result(conn)
    }

    pub fn find_with_mentor(
        conn: &mut PgConnection,
        quiz_id: Uuid,
    ) -> Result<Option<(Quiz, String)>, diesel::result::Error> {
        quizzes::table
            .inner_join(users::table)
            .filter(quizzes::id.eq(quiz_id))
            .select((Quiz::as_select(), users::full_name))
            .first(conn)
            .optional()
    }

    pub fn list_questions(
        conn: &mut PgConnection,
        quiz_id: Uuid,
    ) -> Result<Vec<QuizQuestion>, diesel::result::Error> {
        quiz_questions::table
            .filter(quiz_questions::quiz_id.eq(quiz_id))
            .select(QuizQuestion::as_select())
            .order(quiz_questions::position.asc())
            .load(conn)
    }

    pub fn answer_keys(
        conn: &mut PgConnection,
        quiz_id: Uuid,
    ) -> Result<Vec<AnswerKey>, diesel::result::Error> {
        quiz_questions::table
            .filter(quiz_questions::quiz_id.eq(quiz_id))
            .select(AnswerKey::as_select())
            .order(quiz_questions::position.asc())
            .load(conn)
    }

    pub fn insert_attempt(
        conn: &mut PgConnection,
        attempt: &NewQuizAttempt,
    ) -> Result<QuizAttempt, diesel::result::Error> {
        diesel::insert_into(quiz_attempts::table)
            .values(attempt)
            .returning(QuizAttempt::as_returning())
            .get_result(conn)
    }

    pub fn insert_answers(
        conn: &mut PgConnection,
        answers: &[NewQuizAnswer],
    ) -> Result<usize, diesel::result::Error> {
        if answers.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(quiz_answers::table)
            .values(answers)
            .execute(conn)
    }

    pub fn list_active_with_mentor(
        conn: &mut PgConnection,
    ) -> Result<Vec<(Quiz, String)>, diesel::result::Error> {
        quizzes::table
            .inner_join(users::table)
            .filter(quizzes::status.eq(QuizStatus::Active))
            .select((Quiz::as_select(), users::full_name))
            .order(quizzes::created_at.desc())
            .load(conn)
    }

    pub fn list_by_mentor(
        conn: &mut PgConnection,
        mentor_id: Uuid,
    ) -> Result<Vec<Quiz>, diesel::result::Error> {
        quizzes::table
            .filter(quizzes::mentor_id.eq(mentor_id))
            .select(Quiz::as_select())
            .order(quizzes::created_at.desc())
            .load(conn)
    }

    /// `(quiz_id, question count)` for each quiz that has questions.
    pub fn question_counts(
        conn: &mut PgConnection,
        quiz_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, i64)>, diesel::result::Error> {
        quiz_questions::table
            .filter(quiz_questions::quiz_id.eq_any(quiz_ids))
            .group_by(quiz_questions::quiz_id)
            .select((quiz_questions::quiz_id, diesel::dsl::count_star()))
            .load(conn)
    }

    /// `(quiz_id, score)` of every attempt on the given quizzes, optionally
    /// restricted to one student.
    pub fn attempt_scores(
        conn: &mut PgConnection,
        quiz_ids: &[Uuid],
        student_id: Option<Uuid>,
    ) -> Result<Vec<(Uuid, f64)>, diesel::result::Error> {
        let mut query = quiz_attempts::table
            .filter(quiz_attempts::quiz_id.eq_any(quiz_ids))
            .select((quiz_attempts::quiz_id, quiz_attempts::score))
            .into_boxed();
        if let Some(student) = student_id {
            query = query.filter(quiz_attempts::student_id.eq(student));
        }
        query.load(conn)
    }

    /// Mean score, best score and distinct quizzes attempted for every
    /// student, aggregated in one grouped query.
    pub fn student_scores(
        conn: &mut PgConnection,
    ) -> Result<Vec<StudentScores>, diesel::result::Error> {
        use diesel::dsl::{avg, count_distinct, max};

        users::table
            .left_join(quiz_attempts::table)
            .filter(users::role.eq(UserRole::Student))
            .group_by((users::id, users::username))
            .select((
                users::id,
                users::username,
                avg(quiz_attempts::score.nullable()),
                max(quiz_attempts::score.nullable()),
                count_distinct(quiz_attempts::quiz_id.nullable()),
            ))
            .load::<StudentScores>(conn)
    }
}
