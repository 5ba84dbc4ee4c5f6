use crate::db::enums::ProgressStatus;

/// Display lock per step, given each step's status in order. The first step
/// is never locked; later steps unlock once their predecessor is completed.
pub fn compute_locks(statuses: &[ProgressStatus]) -> Vec<bool> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, _)| i > 0 && !statuses[i - 1].is_completed())
        .collect()
}
