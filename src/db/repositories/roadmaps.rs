use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::roadmap::{
    NewRoadmap, NewRoadmapStep, NewStepResource, Roadmap, RoadmapChanges, RoadmapStep,
    StepChanges, StepResource,
};
use crate::schema::{roadmap_steps, roadmaps, step_resources, student_progress, users};

pub struct RoadmapRepo;

impl RoadmapRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<Option<Roadmap>, diesel::result::Error> {
        roadmaps::table
            .filter(roadmaps::id.eq(roadmap_id))
            .select(Roadmap::as_select())
            .first(conn)
            .optional()
    }

    /// Loads the roadmap and holds a row lock on it until the surrounding
    /// transaction ends. Progress writers take a share lock on the same row.
    pub fn lock_for_update(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<Option<Roadmap>, diesel::result::Error> {
        roadmaps::table
            .filter(roadmaps::id.eq(roadmap_id))
            .select(Roadmap::as_select())
            .for_update()
            .first(conn)
            .optional()
    }

    pub fn lock_for_share(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<Option<Uuid>, diesel::result::Error> {
        roadmaps::table
            .filter(roadmaps::id.eq(roadmap_id))
            .select(roadmaps::id)
            .for_share()
            .first(conn)
            .optional()
    }

    pub fn find_with_mentor(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<Option<(Roadmap, String)>, diesel::result::Error> {
        roadmaps::table
            .inner_join(users::table)
            .filter(roadmaps::id.eq(roadmap_id))
            .select((Roadmap::as_select(), users::full_name))
            .first(conn)
            .optional()
    }

    pub fn list_with_mentor(
        conn: &mut PgConnection,
    ) -> Result<Vec<(Roadmap, String)>, diesel::result::Error> {
        roadmaps::table
            .inner_join(users::table)
            .select((Roadmap::as_select(), users::full_name))
            .order(roadmaps::created_at.desc())
            .load(conn)
    }

    pub fn list_by_owner(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Roadmap>, diesel::result::Error> {
        roadmaps::table
            .filter(roadmaps::created_by.eq(owner_id))
            .select(Roadmap::as_select())
            .order(roadmaps::created_at.desc())
            .load(conn)
    }

    /// True when at least one student has recorded progress on any step.
    pub fn has_student_progress(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(
            student_progress::table
                .inner_join(roadmap_steps::table)
                .filter(roadmap_steps::roadmap_id.eq(roadmap_id)),
        ))
        .get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_roadmap: &NewRoadmap,
    ) -> Result<Roadmap, diesel::result::Error> {
        diesel::insert_into(roadmaps::table)
            .values(new_roadmap)
            .returning(Roadmap::as_returning())
            .get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
        changes: &RoadmapChanges,
    ) -> Result<Roadmap, diesel::result::Error> {
        diesel::update(roadmaps::table.filter(roadmaps::id.eq(roadmap_id)))
            .set(changes)
            .returning(Roadmap::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(roadmaps::table.filter(roadmaps::id.eq(roadmap_id))).execute(conn)
    }

    // Steps

    pub fn insert_step(
        conn: &mut PgConnection,
        new_step: &NewRoadmapStep,
    ) -> Result<RoadmapStep, diesel::result::Error> {
        diesel::insert_into(roadmap_steps::table)
            .values(new_step)
            .returning(RoadmapStep::as_returning())
            .get_result(conn)
    }

    pub fn update_step(
        conn: &mut PgConnection,
        step_id: Uuid,
        changes: &StepChanges,
    ) -> Result<RoadmapStep, diesel::result::Error> {
        diesel::update(roadmap_steps::table.filter(roadmap_steps::id.eq(step_id)))
            .set(changes)
            .returning(RoadmapStep::as_returning())
            .get_result(conn)
    }

    pub fn list_steps(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<Vec<RoadmapStep>, diesel::result::Error> {
        roadmap_steps::table
            .filter(roadmap_steps::roadmap_id.eq(roadmap_id))
            .select(RoadmapStep::as_select())
            .order(roadmap_steps::order_index.asc())
            .load(conn)
    }

    /// `(step_id, roadmap_id)` pairs for every step of the given roadmaps.
    pub fn step_ids_for_roadmaps(
        conn: &mut PgConnection,
        roadmap_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Uuid)>, diesel::result::Error> {
        roadmap_steps::table
            .filter(roadmap_steps::roadmap_id.eq_any(roadmap_ids))
            .select((roadmap_steps::id, roadmap_steps::roadmap_id))
            .load(conn)
    }

    pub fn find_step_roadmap_id(
        conn: &mut PgConnection,
        step_id: Uuid,
    ) -> Result<Option<Uuid>, diesel::result::Error> {
        roadmap_steps::table
            .filter(roadmap_steps::id.eq(step_id))
            .select(roadmap_steps::roadmap_id)
            .first(conn)
            .optional()
    }

    pub fn delete_steps(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(roadmap_steps::table.filter(roadmap_steps::roadmap_id.eq(roadmap_id)))
            .execute(conn)
    }

    /// Progress recorded on these steps is removed with them.
    pub fn delete_steps_by_ids(
        conn: &mut PgConnection,
        step_ids: &[Uuid],
    ) -> Result<usize, diesel::result::Error> {
        if step_ids.is_empty() {
            return Ok(0);
        }
        diesel::delete(roadmap_steps::table.filter(roadmap_steps::id.eq_any(step_ids)))
            .execute(conn)
    }

    pub fn count_steps(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<i64, diesel::result::Error> {
        roadmap_steps::table
            .filter(roadmap_steps::roadmap_id.eq(roadmap_id))
            .count()
            .get_result(conn)
    }

    // Resources

    pub fn insert_resources(
        conn: &mut PgConnection,
        resources: &[NewStepResource],
    ) -> Result<usize, diesel::result::Error> {
        if resources.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(step_resources::table)
            .values(resources)
            .execute(conn)
    }

    pub fn list_resources(
        conn: &mut PgConnection,
        steps: &[RoadmapStep],
    ) -> Result<Vec<StepResource>, diesel::result::Error> {
        StepResource::belonging_to(steps)
            .select(StepResource::as_select())
            .order(step_resources::position.asc())
            .load(conn)
    }

    pub fn delete_resources(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        let step_ids = roadmap_steps::table
            .filter(roadmap_steps::roadmap_id.eq(roadmap_id))
            .select(roadmap_steps::id);
        diesel::delete(step_resources::table.filter(step_resources::step_id.eq_any(step_ids)))
            .execute(conn)
    }

    pub fn count_resources(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
    ) -> Result<i64, diesel::result::Error> {
        step_resources::table
            .inner_join(roadmap_steps::table)
            .filter(roadmap_steps::roadmap_id.eq(roadmap_id))
            .count()
            .get_result(conn)
    }
}
