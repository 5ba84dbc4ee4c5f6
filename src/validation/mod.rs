pub mod auth;
pub mod quiz;
pub mod roadmap;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    db::models::api::{ApiResponse, ErrorDetail},
    error::AppError,
};

/// JSON body extractor for bodies checked by the hand-written validators.
/// Every `Json` rejection (syntax, wrong field types, missing content type)
/// becomes a 400 in the response envelope.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(json_rejection_error)
    }
}

fn json_rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            AppError::validation(format!("Invalid request body: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected request with `Content-Type: application/json`")
        }
        _ => AppError::validation("Invalid JSON format"),
    }
}

/// JSON body extractor that runs the `validator` rules of `T`. Parse failures
/// and rule violations both answer 400, the latter with per-field details.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| json_rejection_error(rejection).into_response())?;

        value.validate().map_err(|errors| {
            let mut error_details: Vec<ErrorDetail> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(move |error| ErrorDetail {
                        field: Some(field.to_string()),
                        code: error.code.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
                    })
                })
                .collect();
            error_details.sort_by(|a, b| a.field.cmp(&b.field));
            validation_error_response(error_details).into_response()
        })?;

        Ok(ValidatedJson(value))
    }
}

pub fn validation_error_response(errors: Vec<ErrorDetail>) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::validation_error(errors)))
}

pub mod rules {
    use validator::ValidationError;

    /// Letters, digits, `_` and `-`; must not start with a digit.
    pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
        if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            let mut err = ValidationError::new("invalid_username_format");
            err.message = Some("Username can only contain letters, numbers, '_' and '-'".into());
            return Err(err);
        }

        if username.chars().next().is_some_and(|c| c.is_numeric()) {
            let mut err = ValidationError::new("username_starts_with_number");
            err.message = Some("Username cannot start with a number".into());
            return Err(err);
        }

        Ok(())
    }

}
