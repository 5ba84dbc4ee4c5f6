use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::ProgressStatus;
use crate::db::models::roadmap::{NewStudentProgress, StudentProgress};
use crate::schema::{roadmap_steps, student_progress};

pub struct ProgressRepo;

impl ProgressRepo {
    /// Inserts or overwrites the row for `(student_id, step_id)`.
    pub fn upsert(
        conn: &mut PgConnection,
        progress: &NewStudentProgress,
    ) -> Result<StudentProgress, diesel::result::Error> {
        diesel::insert_into(student_progress::table)
            .values(progress)
            .on_conflict((student_progress::student_id, student_progress::step_id))
            .do_update()
            .set((
                student_progress::status.eq(progress.status),
                student_progress::completed_at.eq(progress.completed_at),
                student_progress::updated_at.eq(progress.updated_at),
            ))
            .returning(StudentProgress::as_returning())
            .get_result(conn)
    }

    /// `(step_id, status)` for each of the student's rows among `step_ids`.
    pub fn statuses_for_steps(
        conn: &mut PgConnection,
        student_id: Uuid,
        step_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, ProgressStatus)>, diesel::result::Error> {
        student_progress::table
            .filter(student_progress::student_id.eq(student_id))
            .filter(student_progress::step_id.eq_any(step_ids))
            .select((student_progress::step_id, student_progress::status))
            .load(conn)
    }

    /// `(roadmap_id, student_id)` for every progress row on the given roadmaps.
    pub fn students_for_roadmaps(
        conn: &mut PgConnection,
        roadmap_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Uuid)>, diesel::result::Error> {
        student_progress::table
            .inner_join(roadmap_steps::table)
            .filter(roadmap_steps::roadmap_id.eq_any(roadmap_ids))
            .select((roadmap_steps::roadmap_id, student_progress::student_id))
            .distinct()
            .load(conn)
    }
}
