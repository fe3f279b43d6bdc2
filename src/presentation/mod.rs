// Presentation layer - HTTP routes over the chart service
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_chart, delete_chart, get_chart, health_check, mount_view, refresh_chart, refresh_view,
    unmount_view,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts", post(create_chart))
        .route("/charts/:handle", get(get_chart).delete(delete_chart))
        .route("/charts/:handle/data", put(refresh_chart))
        .route(
            "/fridges/:id/view",
            post(mount_view).put(refresh_view).delete(unmount_view),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
