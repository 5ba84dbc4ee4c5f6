use bcrypt::{hash, verify};
use diesel::prelude::*;
use tracing::info;

use crate::{
    db::models::api::error_codes,
    db::models::auth::{AuthUser, LoginRequest, LoginResponse, NewUser, SignupRequest},
    db::repositories::auth::AuthRepo,
    error::AppError,
    middleware::auth::TokenService,
    services::context::RequestContext,
    validation::auth::{validate_login_request, validate_signup_role},
};

pub struct AuthService;

impl AuthService {
    pub fn signup(
        conn: &mut PgConnection,
        req: &SignupRequest,
        bcrypt_cost: u32,
    ) -> Result<AuthUser, AppError> {
        let role = validate_signup_role(req.role.as_deref())?;

        if AuthRepo::exists_by_email(conn, &req.email)? {
            return Err(AppError::conflict_with_code(
                "Email already exists",
                Some("email".to_string()),
                error_codes::USER_EMAIL_EXISTS,
            ));
        }

        if AuthRepo::exists_by_username(conn, &req.username)? {
            return Err(AppError::conflict_with_code(
                "Username already exists",
                Some("username".to_string()),
                error_codes::USER_USERNAME_EXISTS,
            ));
        }

        let password_hash = hash(&req.password, bcrypt_cost)?;

        let new_user = NewUser {
            username: req.username.clone(),
            email: req.email.clone(),
            password_hash,
            full_name: req.full_name.clone(),
            role,
        };

        let user = AuthRepo::insert_user(conn, &new_user)?;
        info!(user_id = %user.id, role = user.role.as_str(), "User signed up");
        Ok(AuthUser::from(user))
    }

    pub fn login(
        conn: &mut PgConnection,
        req: &LoginRequest,
        tokens: &TokenService,
    ) -> Result<LoginResponse, AppError> {
        validate_login_request(&req.email, &req.password)?;

        let user = AuthRepo::find_by_email(conn, &req.email)?
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        if !verify(&req.password, &user.password_hash)? {
            return Err(AppError::auth("Invalid email or password"));
        }

        let user = AuthUser::from(user);
        let token = tokens.generate_access_token(&user)?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in(),
            role: user.role,
            user,
        })
    }

    pub fn profile(conn: &mut PgConnection, ctx: &RequestContext) -> Result<AuthUser, AppError> {
        let user = AuthRepo::find_by_id(conn, ctx.user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        Ok(AuthUser::from(user))
    }
}
