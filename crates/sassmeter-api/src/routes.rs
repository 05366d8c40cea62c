//! Route table.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/questions", get(handlers::list_questions))
        .route("/api/v1/sessions", post(handlers::create_session))
        .route(
            "/api/v1/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/v1/sessions/{id}/start", post(handlers::start))
        .route("/api/v1/sessions/{id}/answer", post(handlers::answer))
        .route("/api/v1/sessions/{id}/rating", post(handlers::rate))
        .route("/api/v1/sessions/{id}/continue", post(handlers::continue_quiz))
        .route("/api/v1/sessions/{id}/restart", post(handlers::restart))
        .with_state(state)
}
