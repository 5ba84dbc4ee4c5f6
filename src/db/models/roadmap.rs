use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::enums::ProgressStatus;

// Roadmap models
#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::roadmaps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Roadmap {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub difficulty_level: String,
    pub estimated_hours: Option<i32>,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::roadmaps)]
pub struct NewRoadmap<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
    pub difficulty_level: &'a str,
    pub estimated_hours: Option<i32>,
    pub created_by: Uuid,
}

/// Scalar columns rewritten on every update.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::roadmaps)]
#[diesel(treat_none_as_null = true)]
pub struct RoadmapChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
    pub difficulty_level: &'a str,
    pub estimated_hours: Option<i32>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Clone, Debug)]
#[diesel(belongs_to(Roadmap))]
#[diesel(table_name = crate::schema::roadmap_steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoadmapStep {
    pub id: Uuid,
    pub roadmap_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::roadmap_steps)]
pub struct NewRoadmapStep<'a> {
    pub roadmap_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub order_index: i32,
}

/// In-place rewrite of a step that keeps its id.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::roadmap_steps)]
#[diesel(treat_none_as_null = true)]
pub struct StepChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub order_index: i32,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Clone, Debug)]
#[diesel(belongs_to(RoadmapStep, foreign_key = step_id))]
#[diesel(table_name = crate::schema::step_resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StepResource {
    pub id: Uuid,
    pub step_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url: String,
    pub description: Option<String>,
    #[serde(skip)]
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::step_resources)]
pub struct NewStepResource<'a> {
    pub step_id: Uuid,
    pub title: &'a str,
    pub resource_type: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub position: i32,
}

// Progress models
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::student_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentProgress {
    pub id: Uuid,
    pub student_id: Uuid,
    pub step_id: Uuid,
    pub status: ProgressStatus,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::student_progress)]
pub struct NewStudentProgress {
    pub student_id: Uuid,
    pub step_id: Uuid,
    pub status: ProgressStatus,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Request DTOs
//
// Required strings default to empty so a missing field reaches the
// validator and is reported by name instead of as a JSON parse failure.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RoadmapRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub difficulty_level: String,
    pub estimated_hours: Option<i32>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

/// One step of a roadmap body. Its position in the list is its order.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct StepInput {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceInput>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ResourceInput {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub url: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ProgressRequest {
    #[serde(default)]
    pub status: String,
}

// Response DTOs
#[derive(Serialize, Debug)]
pub struct CreatedRoadmap {
    #[serde(rename = "roadmapId")]
    pub roadmap_id: Uuid,
}

#[derive(Serialize, Clone, Debug)]
pub struct StepView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub resources: Vec<StepResource>,
    pub progress: ProgressStatus,
    pub is_locked: bool,
}

#[derive(Serialize, Debug)]
pub struct RoadmapView {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub mentor_name: String,
    pub steps: Vec<StepView>,
}

#[derive(Serialize, Debug)]
pub struct RoadmapSummary {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub mentor_name: String,
    pub total_steps: i64,
    pub completed_steps: i64,
    pub in_progress_steps: i64,
}

#[derive(Serialize, Debug)]
pub struct MentorRoadmapSummary {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub total_steps: i64,
    pub total_students: i64,
    pub has_student_progress: bool,
}
