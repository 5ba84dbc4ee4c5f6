use axum::{Server, http::HeaderValue, middleware::from_fn};
use mentor_backend::{
    AppState,
    config::Config,
    db::build_pool,
    error::AppError,
    init_tracing,
    middleware::{logger::logger, request_tracking_middleware},
    routes::create_router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let db = build_pool(&config.database())?;
    let redis = redis::Client::open(config.cache().redis_url)?;

    let server = config.server();
    let cors = build_cors(&server.cors_origins);
    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(AppState::new(db, redis, config));

    let app = create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware))
        .layer(from_fn(logger));

    info!(address = %addr, "Server running");
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    base.allow_origin(origins)
}
