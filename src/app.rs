use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/reset", post(handlers::reset_form))
        .route("/api/status", get(handlers::get_status))
        .route("/api/analytics", get(handlers::get_analytics))
        .route("/api/analytics/toggle", post(handlers::toggle_analytics))
        .route("/api/click", post(handlers::click))
        .route("/api/alert", post(handlers::alert))
        .route("/api/confirm", post(handlers::confirm))
        .route("/api/auto/start", post(handlers::start_auto))
        .route("/api/auto/stop", post(handlers::stop_auto))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
