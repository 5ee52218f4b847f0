// Presentation layer - HTTP surface over the dashboard controller
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    cancel_edit, change_layout, enter_edit, get_dashboard, health_check, logout, reload_dashboard,
    save_layout, session_status, sign_in, toggle_visibility,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/reload", post(reload_dashboard))
        .route("/dashboard/edit", post(enter_edit))
        .route("/dashboard/cancel", post(cancel_edit))
        .route("/dashboard/layout", post(change_layout))
        .route("/dashboard/cards/:card_id/visibility", post(toggle_visibility))
        .route("/dashboard/save", post(save_layout))
        .route("/session", get(session_status).post(sign_in))
        .route("/session/logout", post(logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
