use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::config::Config;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    // `{id}` is a stack id, except on the GET routes where it names the board
    let stack_routes = Router::new()
        .route("/", post(handlers::stacks::create_stack))
        .route(
            "/{id}",
            get(handlers::stacks::list_stacks)
                .put(handlers::stacks::update_stack)
                .delete(handlers::stacks::delete_stack),
        )
        .route("/{id}/archived", get(handlers::stacks::list_archived_stacks))
        .route("/{id}/reorder", put(handlers::stacks::reorder_stack));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::liveness))
        .nest("/api/stacks", stack_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
