use axum::Router;
use axum::middleware;
use axum::routing::{MethodRouter, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    get_result_handler, health_handler, job_handler, poll_handler, transcribe_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let routes: [(&str, MethodRouter<AppState>); 5] = [
        ("/transcribe", get(transcribe_handler)),
        ("/poll", get(poll_handler)),
        ("/get_result", get(get_result_handler)),
        ("/job", get(job_handler)),
        ("/healthcheck", get(health_handler)),
    ];

    // Callers use the trailing-slash form; accept both.
    let router = routes
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            router
                .route(&format!("{}/", path), handler.clone())
                .route(path, handler)
        });

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
