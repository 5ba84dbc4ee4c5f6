use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::ProgressStatus,
    db::models::roadmap::{NewStudentProgress, StudentProgress},
    db::repositories::{progress::ProgressRepo, roadmaps::RoadmapRepo},
    error::AppError,
    services::context::RequestContext,
    validation::roadmap::parse_progress_status,
};

pub struct ProgressService;

impl ProgressService {
    /// Records the caller's status for one step. `completed_at` is stamped
    /// only for COMPLETED and cleared otherwise.
    ///
    /// Holds a share lock on the owning roadmap while writing, which orders
    /// this write against a concurrent structural edit of the same roadmap.
    pub fn set_progress(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        step_id: Uuid,
        status: &str,
    ) -> Result<StudentProgress, AppError> {
        let status = parse_progress_status(status)?;

        conn.build_transaction()
            .read_committed()
            .run::<_, AppError, _>(|conn| {
                let roadmap_id = RoadmapRepo::find_step_roadmap_id(conn, step_id)?
                    .ok_or_else(|| AppError::not_found("Step"))?;
                RoadmapRepo::lock_for_share(conn, roadmap_id)?
                    .ok_or_else(|| AppError::not_found("Step"))?;

                // The step may have been replaced while waiting for the lock.
                if RoadmapRepo::find_step_roadmap_id(conn, step_id)?.is_none() {
                    return Err(AppError::not_found("Step"));
                }

                let now = Utc::now();
                let progress = NewStudentProgress {
                    student_id: ctx.user_id,
                    step_id,
                    status,
                    completed_at: completion_time(status, now),
                    updated_at: now,
                };
                Ok(ProgressRepo::upsert(conn, &progress)?)
            })
    }
}

fn completion_time(
    status: ProgressStatus,
    now: chrono::DateTime<Utc>,
) -> Option<chrono::DateTime<Utc>> {
    status.is_completed().then_some(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_at_only_for_completed() {
        let now = Utc::now();
        assert_eq!(completion_time(ProgressStatus::Completed, now), Some(now));
        assert_eq!(completion_time(ProgressStatus::InProgress, now), None);
        assert_eq!(completion_time(ProgressStatus::NotStarted, now), None);
    }
}
