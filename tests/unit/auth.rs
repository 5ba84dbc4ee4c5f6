// Unit tests focus on pure validation and token handling

use mentor_backend::config::AuthConfig;
use mentor_backend::db::enums::UserRole;
use mentor_backend::db::models::auth::{AuthUser, LoginRequest, SignupRequest};
use mentor_backend::middleware::auth::TokenService;
use uuid::Uuid;
use validator::Validate;

fn signup(username: &str, email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        full_name: "Test User".to_string(),
        role: None,
    }
}

#[test]
fn signup_request_rules() {
    assert!(signup("ada_l", "ada@example.com", "longenough").validate().is_ok());
    assert!(signup("ad", "ada@example.com", "longenough").validate().is_err());
    assert!(signup("1ada", "ada@example.com", "longenough").validate().is_err());
    assert!(signup("ada_l", "not-an-email", "longenough").validate().is_err());
    assert!(signup("ada_l", "ada@example.com", "short").validate().is_err());
}

#[test]
fn login_request_rules() {
    use mentor_backend::validation::auth::validate_login_request;

    let ok = LoginRequest {
        email: "ada@example.com".to_string(),
        password: "x".to_string(),
    };
    assert!(ok.validate().is_ok());
    assert!(validate_login_request("ada@example.com", "x").is_ok());
    assert!(validate_login_request("", "x").is_err());
    assert!(validate_login_request("ada@example.com", "").is_err());
}

#[test]
fn signup_role_policy() {
    use mentor_backend::validation::auth::validate_signup_role;

    assert_eq!(validate_signup_role(Some("student")).unwrap(), UserRole::Student);
    assert_eq!(validate_signup_role(Some("mentor")).unwrap(), UserRole::Mentor);
    assert!(validate_signup_role(Some("admin")).is_err());
}

#[test]
fn expired_token_is_rejected() {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use mentor_backend::middleware::auth::Claims;

    let tokens = TokenService::new(&AuthConfig {
        jwt_secret: "unit-secret".to_string(),
        access_token_expires_in: 60,
        bcrypt_cost: 4,
    });
    let user = AuthUser {
        id: Uuid::new_v4(),
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        full_name: "Ada".to_string(),
        role: UserRole::Student,
    };
    assert!(tokens.verify_token(&tokens.generate_access_token(&user).unwrap()).is_ok());

    let stale = Claims {
        sub: user.id,
        role: user.role,
        username: user.username.clone(),
        exp: 1_000,
        iat: 0,
        jti: Uuid::new_v4().to_string(),
    };
    let token = encode(
        &Header::default(),
        &stale,
        &EncodingKey::from_secret(b"unit-secret"),
    )
    .unwrap();
    assert!(tokens.verify_token(&token).is_err());
}
