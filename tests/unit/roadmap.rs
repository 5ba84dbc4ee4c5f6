// Roadmap body validation; persistence is covered by the database tests

use mentor_backend::db::models::roadmap::{ResourceInput, RoadmapRequest, StepInput};
use mentor_backend::validation::roadmap::{parse_progress_status, validate_roadmap_request};

fn step(title: &str) -> StepInput {
    StepInput {
        title: title.to_string(),
        description: Some(format!("{} in depth", title)),
        resources: vec![ResourceInput {
            title: format!("{} notes", title),
            resource_type: "article".to_string(),
            url: "https://example.com".to_string(),
            description: None,
        }],
    }
}

fn request() -> RoadmapRequest {
    RoadmapRequest {
        title: "Backend".to_string(),
        description: "From zero to services".to_string(),
        category: "Engineering".to_string(),
        subcategory: "Web".to_string(),
        difficulty_level: "intermediate".to_string(),
        estimated_hours: None,
        steps: vec![step("HTTP"), step("SQL")],
    }
}

#[test]
fn validate_roadmap_body() {
    assert!(validate_roadmap_request(&request()).is_ok());

    let mut missing_title = request();
    missing_title.title.clear();
    assert!(validate_roadmap_request(&missing_title).is_err());

    let mut blank_step = request();
    blank_step.steps[1].title = "   ".to_string();
    assert!(validate_roadmap_request(&blank_step).is_err());

    let mut negative_hours = request();
    negative_hours.estimated_hours = Some(-3);
    assert!(validate_roadmap_request(&negative_hours).is_err());
}

#[test]
fn missing_json_fields_reach_the_validator() {
    let body: RoadmapRequest = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
    assert!(body.steps.is_empty());
    assert!(validate_roadmap_request(&body).is_err());
}

#[test]
fn resource_type_is_read_from_type_key() {
    let body: ResourceInput =
        serde_json::from_str(r#"{"title": "Docs", "type": "video", "url": "https://x"}"#).unwrap();
    assert_eq!(body.resource_type, "video");
}

#[test]
fn progress_status_parsing() {
    assert!(parse_progress_status("IN_PROGRESS").is_ok());
    assert!(parse_progress_status("FINISHED").is_err());
    assert!(parse_progress_status("").is_err());
}
