use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/bounds", get(handlers::get_bounds))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/totals", get(handlers::get_totals))
        .route("/api/daily", get(handlers::get_daily))
        .route("/api/yearly", get(handlers::get_yearly))
        .route("/api/monthly", get(handlers::get_monthly))
        .route("/api/weather", get(handlers::get_weather))
        .with_state(state)
}
