pub mod auth;
pub mod logger;
pub mod request_tracking;

pub use auth::{AuthUserInfo, TokenService, auth_middleware};
pub use logger::RequestActor;
pub use request_tracking::{REQUEST_ID_HEADER, extract_request_id, request_tracking_middleware};
