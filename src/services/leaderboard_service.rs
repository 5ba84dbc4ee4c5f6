use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::leaderboard::{LeaderboardEntry, StudentRanking, StudentScores},
    db::repositories::{auth::AuthRepo, quizzes::QuizRepo},
    error::AppError,
};

pub struct LeaderboardService;

impl LeaderboardService {
    /// All students ranked by mean attempt score. `search` narrows the output
    /// by a case-insensitive username fragment; ranks stay global.
    pub fn leaderboard(
        conn: &mut PgConnection,
        search: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        Ok(search_standings(Self::standings(conn)?, search))
    }

    pub fn student_ranking(
        conn: &mut PgConnection,
        student_id: Uuid,
    ) -> Result<StudentRanking, AppError> {
        let is_student = AuthRepo::find_by_id(conn, student_id)?
            .is_some_and(|user| user.role == UserRole::Student);
        if !is_student {
            return Err(AppError::not_found("Student"));
        }

        Self::standings(conn)?
            .into_iter()
            .find(|s| s.id == student_id)
            .ok_or_else(|| AppError::not_found("Student"))
    }

    fn standings(conn: &mut PgConnection) -> Result<Vec<StudentRanking>, AppError> {
        Ok(rank_students(QuizRepo::student_scores(conn)?))
    }
}

/// Keeps the standings whose username contains `search`, ignoring case.
/// Ranks are not renumbered, so a filtered entry keeps its place among all
/// students. A blank search keeps everyone.
pub fn search_standings(standings: Vec<StudentRanking>, search: Option<&str>) -> Vec<LeaderboardEntry> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    standings
        .into_iter()
        .filter(|s| {
            needle
                .as_ref()
                .is_none_or(|n| s.username.to_lowercase().contains(n.as_str()))
        })
        .map(|s| LeaderboardEntry {
            id: s.id,
            username: s.username,
            score: s.avg_score,
            rank: s.rank,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ranks students by mean score, highest first, ties broken by username.
/// Students without attempts score 0.
pub fn rank_students(scores: Vec<StudentScores>) -> Vec<StudentRanking> {
    let mut standings: Vec<StudentRanking> = scores
        .into_iter()
        .map(|s| StudentRanking {
            id: s.student_id,
            username: s.username,
            avg_score: round2(s.avg_score.unwrap_or(0.0)),
            quizzes_taken: s.quizzes_taken,
            best_score: s.best_score.map(round2),
            rank: 0,
        })
        .collect();

    standings.sort_by(|a, b| {
        b.avg_score
            .total_cmp(&a.avg_score)
            .then_with(|| a.username.cmp(&b.username))
    });
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i as i64 + 1;
    }
    standings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(username: &str, avg: Option<f64>, best: Option<f64>, taken: i64) -> StudentScores {
        StudentScores {
            student_id: Uuid::new_v4(),
            username: username.to_string(),
            avg_score: avg,
            best_score: best,
            quizzes_taken: taken,
        }
    }

    #[test]
    fn ranks_by_average_and_keeps_idle_students() {
        let ranked = rank_students(vec![
            scores("ada", Some(60.0), Some(60.0), 1),
            scores("cy", None, None, 0),
            scores("bob", Some(75.0), Some(100.0), 1),
        ]);
        let order: Vec<_> = ranked.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(order, ["bob", "ada", "cy"]);
        assert_eq!(ranked[0].avg_score, 75.0);
        assert_eq!(ranked[0].best_score, Some(100.0));
        assert_eq!(ranked[2].avg_score, 0.0);
        assert_eq!(ranked[2].best_score, None);
        assert_eq!(
            ranked.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn averages_are_rounded_to_two_decimals() {
        let ranked = rank_students(vec![scores("ada", Some(100.0 / 3.0), Some(100.0), 3)]);
        assert_eq!(ranked[0].avg_score, 33.33);
        assert_eq!(ranked[0].quizzes_taken, 3);
    }

    #[test]
    fn equal_averages_fall_back_to_username() {
        let ranked = rank_students(vec![
            scores("zed", Some(50.0), Some(50.0), 1),
            scores("amy", Some(50.0), Some(80.0), 2),
        ]);
        assert_eq!(ranked[0].username, "amy");
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn search_keeps_global_ranks() {
        let ranked = rank_students(vec![
            scores("Alice", Some(90.0), Some(90.0), 1),
            scores("bob", Some(80.0), Some(80.0), 1),
            scores("malice", Some(70.0), Some(70.0), 1),
        ]);

        let found = search_standings(ranked.clone(), Some("ALIC"));
        let summary: Vec<(&str, i64)> = found.iter().map(|e| (e.username.as_str(), e.rank)).collect();
        assert_eq!(summary, vec![("Alice", 1), ("malice", 3)]);

        assert_eq!(search_standings(ranked.clone(), Some("  ")).len(), 3);
        assert_eq!(search_standings(ranked, None).len(), 3);
    }
}
