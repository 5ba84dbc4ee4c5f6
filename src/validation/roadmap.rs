use crate::db::enums::ProgressStatus;
use crate::db::models::roadmap::RoadmapRequest;
use crate::error::AppError;

const MAX_TITLE_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 100;
const MAX_KIND_LEN: usize = 50;

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn max_len(value: &str, max: usize, field: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Shape rules shared by roadmap creation and structural update.
pub fn validate_roadmap_request(req: &RoadmapRequest) -> Result<(), AppError> {
    require(&req.title, "Title")?;
    require(&req.description, "Description")?;
    require(&req.category, "Category")?;
    require(&req.subcategory, "Subcategory")?;
    require(&req.difficulty_level, "Difficulty level")?;

    max_len(&req.title, MAX_TITLE_LEN, "Title")?;
    max_len(&req.category, MAX_LABEL_LEN, "Category")?;
    max_len(&req.subcategory, MAX_LABEL_LEN, "Subcategory")?;
    max_len(&req.difficulty_level, MAX_KIND_LEN, "Difficulty level")?;

    if let Some(hours) = req.estimated_hours {
        if hours < 0 {
            return Err(AppError::validation("Estimated hours cannot be negative"));
        }
    }

    if req.steps.is_empty() {
        return Err(AppError::validation("At least one step is required"));
    }

    for (i, step) in req.steps.iter().enumerate() {
        let position = i + 1;
        if step.title.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Step {} title is required",
                position
            )));
        }
        max_len(&step.title, MAX_TITLE_LEN, &format!("Step {} title", position))?;

        for (j, resource) in step.resources.iter().enumerate() {
            if resource.title.trim().is_empty()
                || resource.resource_type.trim().is_empty()
                || resource.url.trim().is_empty()
            {
                return Err(AppError::validation(format!(
                    "Step {} resource {} requires title, type and url",
                    position,
                    j + 1
                )));
            }
            max_len(&resource.title, MAX_TITLE_LEN, "Resource title")?;
            max_len(&resource.resource_type, MAX_KIND_LEN, "Resource type")?;
        }
    }

    Ok(())
}

pub fn parse_progress_status(status: &str) -> Result<ProgressStatus, AppError> {
    ProgressStatus::parse(status).ok_or_else(|| {
        AppError::validation("Status must be one of NOT_STARTED, IN_PROGRESS, COMPLETED")
    })
}
