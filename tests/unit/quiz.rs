// Quiz validation and grading; no database required

use mentor_backend::db::models::quiz::{
    AnswerKey, CreateQuizRequest, QuestionInput, SubmitQuizRequest, SubmittedAnswer,
};
use mentor_backend::services::grading::grade;
use mentor_backend::validation::quiz::{validate_create_quiz, validate_submission};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

fn quiz_request(duration: i32) -> CreateQuizRequest {
    CreateQuizRequest {
        title: "Ownership".to_string(),
        description: "Borrowing basics".to_string(),
        category: "Rust".to_string(),
        subcategory: "Core".to_string(),
        difficulty: "easy".to_string(),
        duration_minutes: Some(duration),
        questions: vec![QuestionInput {
            question_text: "Which keyword moves a closure's captures?".to_string(),
            options: vec!["ref".into(), "move".into(), "mut".into(), "static".into()],
            correct_answer: Some(1),
            explanation: Some("`move` takes ownership".to_string()),
        }],
    }
}

#[test]
fn validate_quiz_creation() {
    assert!(validate_create_quiz(&quiz_request(30)).is_ok());
    assert!(validate_create_quiz(&quiz_request(181)).is_err());

    let mut no_questions = quiz_request(30);
    no_questions.questions.clear();
    assert!(validate_create_quiz(&no_questions).is_err());

    let mut five_options = quiz_request(30);
    five_options.questions[0].options.push("extra".into());
    assert!(validate_create_quiz(&five_options).is_err());
}

#[test]
fn one_of_two_answered_correctly_scores_fifty() {
    let q1 = AnswerKey {
        id: Uuid::new_v4(),
        correct_answer: 2,
        explanation: String::new(),
    };
    let q2 = AnswerKey {
        id: Uuid::new_v4(),
        correct_answer: 0,
        explanation: String::new(),
    };
    let answers = vec![SubmittedAnswer {
        question_id: q1.id,
        selected_option: 2,
    }];

    let result = grade(&[q1, q2], &answers, 90);
    assert_eq!(result.correct_answers, 1);
    assert_eq!(result.total_questions, 2);
    assert_eq!(result.score, 50.0);
}

#[test]
fn submission_requires_time_taken() {
    let body: SubmitQuizRequest = serde_json::from_str("{}").unwrap();
    assert!(body.answers.is_empty());
    assert_err!(validate_submission(&body));

    let body: SubmitQuizRequest = serde_json::from_str(r#"{"time_taken": 45}"#).unwrap();
    assert_eq!(assert_ok!(validate_submission(&body)), 45);
}
