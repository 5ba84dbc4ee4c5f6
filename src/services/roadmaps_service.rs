use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::prelude::*;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::enums::ProgressStatus,
    db::models::roadmap::{
        MentorRoadmapSummary, NewRoadmap, NewRoadmapStep, NewStepResource, ResourceInput,
        Roadmap, RoadmapChanges, RoadmapRequest, RoadmapSummary, RoadmapView, StepChanges,
        StepInput, StepView,
    },
    db::repositories::{progress::ProgressRepo, roadmaps::RoadmapRepo},
    error::AppError,
    services::{access::authorize_structural_edit, context::RequestContext, progression},
    validation::roadmap::validate_roadmap_request,
};

pub struct RoadmapsService;

impl RoadmapsService {
    /// Lock evaluator: a roadmap stays structurally editable until some
    /// student records progress on one of its steps.
    pub fn is_editable(conn: &mut PgConnection, roadmap_id: Uuid) -> Result<bool, AppError> {
        Ok(!RoadmapRepo::has_student_progress(conn, roadmap_id)?)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &RoadmapRequest,
    ) -> Result<Roadmap, AppError> {
        validate_roadmap_request(req)?;

        let roadmap = conn.transaction::<_, AppError, _>(|conn| {
            let new_roadmap = NewRoadmap {
                title: &req.title,
                description: &req.description,
                category: &req.category,
                subcategory: &req.subcategory,
                difficulty_level: &req.difficulty_level,
                estimated_hours: req.estimated_hours,
                created_by: ctx.user_id,
            };
            let roadmap = RoadmapRepo::insert(conn, &new_roadmap)?;
            Self::insert_structure(conn, roadmap.id, &req.steps)?;
            Ok(roadmap)
        })?;

        info!(roadmap_id = %roadmap.id, owner_id = %ctx.user_id, steps = req.steps.len(), "Roadmap created");
        Ok(roadmap)
    }

    /// Replaces scalar fields and the step/resource set. The roadmap row is
    /// locked first so a concurrent progress write cannot slip in between the
    /// editability check and the replacement.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        roadmap_id: Uuid,
        req: &RoadmapRequest,
    ) -> Result<Roadmap, AppError> {
        validate_roadmap_request(req)?;

        let updated = conn
            .build_transaction()
            .read_committed()
            .run::<_, AppError, _>(|conn| {
                let roadmap = RoadmapRepo::lock_for_update(conn, roadmap_id)?
                    .ok_or_else(|| AppError::not_found("Roadmap"))?;
                let editable = Self::is_editable(conn, roadmap_id)?;
                authorize_structural_edit(ctx, roadmap.created_by, editable)?;

                let changes = RoadmapChanges {
                    title: &req.title,
                    description: &req.description,
                    category: &req.category,
                    subcategory: &req.subcategory,
                    difficulty_level: &req.difficulty_level,
                    estimated_hours: req.estimated_hours,
                    updated_at: Utc::now(),
                };
                let updated = RoadmapRepo::update_fields(conn, roadmap_id, &changes)?;

                Self::replace_structure(conn, roadmap_id, &req.steps)?;

                Ok(updated)
            })?;

        info!(roadmap_id = %roadmap_id, actor_id = %ctx.user_id, steps = req.steps.len(), "Roadmap updated");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        roadmap_id: Uuid,
    ) -> Result<(), AppError> {
        conn.build_transaction()
            .read_committed()
            .run::<_, AppError, _>(|conn| {
                let roadmap = RoadmapRepo::lock_for_update(conn, roadmap_id)?
                    .ok_or_else(|| AppError::not_found("Roadmap"))?;
                let editable = Self::is_editable(conn, roadmap_id)?;
                authorize_structural_edit(ctx, roadmap.created_by, editable)?;

                RoadmapRepo::delete_resources(conn, roadmap_id)?;
                RoadmapRepo::delete_steps(conn, roadmap_id)?;
                RoadmapRepo::delete_by_id(conn, roadmap_id)?;
                Ok(())
            })?;

        info!(roadmap_id = %roadmap_id, actor_id = %ctx.user_id, "Roadmap deleted");
        Ok(())
    }

    /// Steps get `order_index = position + 1`; resources keep their list order.
    fn insert_structure(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
        steps: &[StepInput],
    ) -> Result<(), AppError> {
        for (i, step) in steps.iter().enumerate() {
            let new_step = NewRoadmapStep {
                roadmap_id,
                title: &step.title,
                description: step.description.as_deref(),
                order_index: i as i32 + 1,
            };
            let inserted = RoadmapRepo::insert_step(conn, &new_step)?;
            Self::insert_resources(conn, inserted.id, &step.resources)?;
        }
        Ok(())
    }

    /// Rewrites existing steps in place by position, so their ids and the
    /// progress recorded on them survive. Extra input steps are appended and
    /// steps past the new length are dropped. Resources are rewritten.
    fn replace_structure(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
        steps: &[StepInput],
    ) -> Result<(), AppError> {
        let existing = RoadmapRepo::list_steps(conn, roadmap_id)?;
        RoadmapRepo::delete_resources(conn, roadmap_id)?;

        let surplus: Vec<Uuid> = existing.iter().skip(steps.len()).map(|s| s.id).collect();
        RoadmapRepo::delete_steps_by_ids(conn, &surplus)?;

        for (i, step) in steps.iter().enumerate() {
            let order_index = i as i32 + 1;
            let step_id = match existing.get(i) {
                Some(current) => {
                    let changes = StepChanges {
                        title: &step.title,
                        description: step.description.as_deref(),
                        order_index,
                    };
                    RoadmapRepo::update_step(conn, current.id, &changes)?.id
                }
                None => {
                    let new_step = NewRoadmapStep {
                        roadmap_id,
                        title: &step.title,
                        description: step.description.as_deref(),
                        order_index,
                    };
                    RoadmapRepo::insert_step(conn, &new_step)?.id
                }
            };
            Self::insert_resources(conn, step_id, &step.resources)?;
        }

        info!(
            roadmap_id = %roadmap_id,
            kept = existing.len().min(steps.len()),
            added = steps.len().saturating_sub(existing.len()),
            removed = surplus.len(),
            "Roadmap steps rewritten"
        );
        Ok(())
    }

    fn insert_resources(
        conn: &mut PgConnection,
        step_id: Uuid,
        resources: &[ResourceInput],
    ) -> Result<(), AppError> {
        let resources: Vec<NewStepResource> = resources
            .iter()
            .enumerate()
            .map(|(j, resource)| NewStepResource {
                step_id,
                title: &resource.title,
                resource_type: &resource.resource_type,
                url: &resource.url,
                description: resource.description.as_deref(),
                position: j as i32,
            })
            .collect();
        RoadmapRepo::insert_resources(conn, &resources)?;
        Ok(())
    }

    /// The roadmap as one student sees it: ordered steps with resources, the
    /// student's status per step and the derived display lock.
    pub fn get_view(
        conn: &mut PgConnection,
        roadmap_id: Uuid,
        student_id: Uuid,
    ) -> Result<RoadmapView, AppError> {
        let (roadmap, mentor_name) = RoadmapRepo::find_with_mentor(conn, roadmap_id)?
            .ok_or_else(|| AppError::not_found("Roadmap"))?;

        let steps = RoadmapRepo::list_steps(conn, roadmap_id)?;
        let resources = RoadmapRepo::list_resources(conn, &steps)?.grouped_by(&steps);

        let step_ids: Vec<Uuid> = steps.iter().map(|s| s.id).collect();
        let progress: HashMap<Uuid, ProgressStatus> =
            ProgressRepo::statuses_for_steps(conn, student_id, &step_ids)?
                .into_iter()
                .collect();

        let statuses: Vec<ProgressStatus> = steps
            .iter()
            .map(|s| progress.get(&s.id).copied().unwrap_or_default())
            .collect();
        let locks = progression::compute_locks(&statuses);

        let steps = steps
            .into_iter()
            .zip(resources)
            .zip(statuses.into_iter().zip(locks))
            .map(|((step, resources), (progress, is_locked))| StepView {
                id: step.id,
                title: step.title,
                description: step.description,
                order_index: step.order_index,
                resources,
                progress,
                is_locked,
            })
            .collect();

        Ok(RoadmapView {
            roadmap,
            mentor_name,
            steps,
        })
    }

    /// Every roadmap, newest first, with the caller's step counts.
    pub fn list(conn: &mut PgConnection, student_id: Uuid) -> Result<Vec<RoadmapSummary>, AppError> {
        let roadmaps = RoadmapRepo::list_with_mentor(conn)?;
        let roadmap_ids: Vec<Uuid> = roadmaps.iter().map(|(r, _)| r.id).collect();

        let step_pairs = RoadmapRepo::step_ids_for_roadmaps(conn, &roadmap_ids)?;
        let step_ids: Vec<Uuid> = step_pairs.iter().map(|(step_id, _)| *step_id).collect();
        let progress: HashMap<Uuid, ProgressStatus> =
            ProgressRepo::statuses_for_steps(conn, student_id, &step_ids)?
                .into_iter()
                .collect();

        let mut counts: HashMap<Uuid, (i64, i64, i64)> = HashMap::new();
        for (step_id, roadmap_id) in &step_pairs {
            let entry = counts.entry(*roadmap_id).or_default();
            entry.0 += 1;
            match progress.get(step_id) {
                Some(ProgressStatus::Completed) => entry.1 += 1,
                Some(ProgressStatus::InProgress) => entry.2 += 1,
                _ => {}
            }
        }

        Ok(roadmaps
            .into_iter()
            .map(|(roadmap, mentor_name)| {
                let (total, completed, in_progress) =
                    counts.get(&roadmap.id).copied().unwrap_or_default();
                RoadmapSummary {
                    roadmap,
                    mentor_name,
                    total_steps: total,
                    completed_steps: completed,
                    in_progress_steps: in_progress,
                }
            })
            .collect())
    }

    /// The caller's own roadmaps with enrolment counts and the lock flag.
    pub fn list_mine(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<MentorRoadmapSummary>, AppError> {
        let roadmaps = RoadmapRepo::list_by_owner(conn, ctx.user_id)?;
        let roadmap_ids: Vec<Uuid> = roadmaps.iter().map(|r| r.id).collect();

        let mut step_counts: HashMap<Uuid, i64> = HashMap::new();
        for (_, roadmap_id) in RoadmapRepo::step_ids_for_roadmaps(conn, &roadmap_ids)? {
            *step_counts.entry(roadmap_id).or_default() += 1;
        }

        let mut students: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for (roadmap_id, student_id) in ProgressRepo::students_for_roadmaps(conn, &roadmap_ids)? {
            students.entry(roadmap_id).or_default().insert(student_id);
        }

        Ok(roadmaps
            .into_iter()
            .map(|roadmap| {
                let total_students = students.get(&roadmap.id).map_or(0, |s| s.len() as i64);
                MentorRoadmapSummary {
                    total_steps: step_counts.get(&roadmap.id).copied().unwrap_or(0),
                    total_students,
                    has_student_progress: total_students > 0,
                    roadmap,
                }
            })
            .collect())
    }
}
