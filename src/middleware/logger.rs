use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::middleware::request_tracking::REQUEST_ID_HEADER;

/// Left on the response by the auth middleware so the access log can name
/// the caller. Public routes never carry one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RequestActor {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Access log: one line per request with the caller when authenticated.
/// Runs outside request tracking, so the request id is read off the response.
pub async fn logger<B>(req: Request<B>, next: Next<B>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    let request_id = response_request_id(&response);

    match response.extensions().get::<RequestActor>() {
        Some(actor) => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed_ms,
            user_id = %actor.user_id,
            role = actor.role.as_str(),
            "Request log"
        ),
        None => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed_ms,
            "Request log"
        ),
    }
    response
}

fn response_request_id(response: &Response) -> String {
    response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
