use mentor_backend::db::models::leaderboard::StudentScores;
use mentor_backend::services::leaderboard_service::{rank_students, search_standings};
use uuid::Uuid;

fn scores(username: &str, avg: Option<f64>) -> StudentScores {
    StudentScores {
        student_id: Uuid::new_v4(),
        username: username.to_string(),
        avg_score: avg,
        best_score: avg,
        quizzes_taken: i64::from(avg.is_some()),
    }
}

#[test]
fn ranks_are_one_based_and_dense_over_all_students() {
    let ranked = rank_students(vec![
        scores("cat", Some(80.0)),
        scores("ant", None),
        scores("bee", Some(90.0)),
    ]);
    let summary: Vec<(&str, i64)> = ranked
        .iter()
        .map(|s| (s.username.as_str(), s.rank))
        .collect();
    assert_eq!(summary, vec![("bee", 1), ("cat", 2), ("ant", 3)]);
}

#[test]
fn filtered_leaderboard_reports_global_rank() {
    let ranked = rank_students(vec![
        scores("cat", Some(80.0)),
        scores("ant", None),
        scores("bee", Some(90.0)),
    ]);
    let entries = search_standings(ranked, Some("an"));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "ant");
    assert_eq!(entries[0].rank, 3);
    assert_eq!(entries[0].score, 0.0);
}

#[test]
fn no_students_no_ranking() {
    assert!(rank_students(Vec::new()).is_empty());
}
