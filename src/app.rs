use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/today", get(handlers::get_today))
        .route("/api/day", post(handlers::log_day))
        .route("/api/day/:date", get(handlers::get_day))
        .route(
            "/api/list-url",
            get(handlers::get_list_url).put(handlers::put_list_url),
        )
        .route("/api/reminder/reset", post(handlers::reset_reminder))
        .with_state(state)
}
