use mentor_backend::db::enums::ProgressStatus::{self, *};
use mentor_backend::services::progression::compute_locks;

#[test]
fn completing_step_k_unlocks_step_k_plus_one() {
    let mut statuses = vec![NotStarted; 4];
    for k in 0..statuses.len() - 1 {
        statuses[k] = Completed;
        let locks = compute_locks(&statuses);
        assert!(!locks[0]);
        assert!(!locks[k + 1], "step {} should be unlocked", k + 2);
    }
}

#[test]
fn in_progress_does_not_unlock() {
    assert_eq!(compute_locks(&[InProgress, NotStarted]), vec![false, true]);
}

#[test]
fn missing_progress_defaults_to_not_started() {
    assert_eq!(ProgressStatus::default(), NotStarted);
}
