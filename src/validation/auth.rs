use crate::db::enums::UserRole;
use crate::error::AppError;

/// Self-service signup may create students and mentors only. A missing role
/// means student.
pub fn validate_signup_role(role: Option<&str>) -> Result<UserRole, AppError> {
    match role.map(str::trim) {
        None | Some("") => Ok(UserRole::Student),
        Some(value) => match UserRole::parse(&value.to_lowercase()) {
            Some(UserRole::Admin) => Err(AppError::validation(
                "Admin accounts cannot be created through signup",
            )),
            Some(role) => Ok(role),
            None => Err(AppError::validation("Role must be 'student' or 'mentor'")),
        },
    }
}

pub fn validate_login_request(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    if password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    Ok(())
}
