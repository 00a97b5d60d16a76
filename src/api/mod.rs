//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, request and response structures.

pub mod handlers;
pub mod requests;
pub mod responses;


use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/countdown", get(countdown_handler))
        .route("/countdown/configure", post(configure_handler))
        .route("/countdown/start", post(start_handler))
        .route("/countdown/disarm", post(disarm_handler))
        .route("/countdown/switches/:index", post(switch_handler))
        .route("/countdown/stream", get(countdown_stream_handler))
        .route("/domination", get(domination_handler))
        .route("/domination/actor", post(actor_handler))
        .route("/domination/fill-duration", post(fill_duration_handler))
        .route("/domination/reset", post(reset_handler))
        .route("/domination/stream", get(domination_stream_handler))
        .route("/events", get(events_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
