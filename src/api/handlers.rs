//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use serde::Serialize;
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream, WatchStream},
    Stream, StreamExt,
};
use tracing::{info, warn};

use super::{
    requests::{validate_switch, ActorRequest, ConfigureRequest, FillDurationRequest},
    responses::{ApiResponse, HealthResponse, StatusResponse},
};
use crate::{
    error::Result,
    state::{AppState, CountdownState, DominationState, Outcome},
};

type CountdownReply = Result<Json<ApiResponse<CountdownState>>>;
type DominationReply = Result<Json<ApiResponse<DominationState>>>;

/// Handle GET /countdown - Current countdown state
pub async fn countdown_handler(State(state): State<Arc<AppState>>) -> CountdownReply {
    Ok(Json(ApiResponse::ok("Countdown state", state.countdown()?)))
}

/// Handle POST /countdown/configure - Arm the countdown
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ConfigureRequest>, JsonRejection>,
) -> CountdownReply {
    let Json(request) = body?;
    let total = request.total_seconds()?;
    let countdown = state.configure_countdown(total)?;
    info!("Configure endpoint called - countdown set to {}s", total);
    Ok(Json(ApiResponse::ok(format!("Countdown set to {}s", total), countdown)))
}

/// Handle POST /countdown/start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CountdownReply {
    let countdown = state.start_countdown()?;
    let message = if countdown.running {
        "Countdown running"
    } else {
        "Countdown cannot start"
    };
    Ok(Json(ApiResponse::ok(message, countdown)))
}

/// Handle POST /countdown/disarm - Begin or confirm a disarm attempt
pub async fn disarm_handler(State(state): State<Arc<AppState>>) -> CountdownReply {
    let countdown = state.request_disarm()?;
    let message = match (countdown.outcome, countdown.puzzle.active) {
        (Outcome::Disarmed, _) => "Countdown disarmed",
        (_, true) => "Disarm attempt in progress",
        _ => "No disarm attempt possible",
    };
    Ok(Json(ApiResponse::ok(message, countdown)))
}

/// Handle POST /countdown/switches/:index - Press a disarm switch
pub async fn switch_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> CountdownReply {
    let index = validate_switch(index)?;
    let countdown = state.press_switch(index)?;
    Ok(Json(ApiResponse::ok(format!("Switch {} pressed", index), countdown)))
}

/// Handle GET /domination - Current domination state
pub async fn domination_handler(State(state): State<Arc<AppState>>) -> DominationReply {
    Ok(Json(ApiResponse::ok("Domination state", state.domination()?)))
}

/// Handle POST /domination/actor - Select the pushing side
pub async fn actor_handler(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ActorRequest>, JsonRejection>,
) -> DominationReply {
    let Json(request) = body?;
    let domination = state.set_actor(request.side)?;
    Ok(Json(ApiResponse::ok(format!("Actor set to {:?}", request.side), domination)))
}

/// Handle POST /domination/fill-duration - Set the time to fill the bar
pub async fn fill_duration_handler(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<FillDurationRequest>, JsonRejection>,
) -> DominationReply {
    let Json(request) = body?;
    let seconds = request.validated()?;
    let domination = state.set_fill_duration(seconds)?;
    Ok(Json(ApiResponse::ok(format!("Fill duration set to {}s", seconds), domination)))
}

/// Handle POST /domination/reset - Even out the bar
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> DominationReply {
    let domination = state.reset_domination()?;
    info!("Reset endpoint called - domination bar reset");
    Ok(Json(ApiResponse::ok("Domination bar reset", domination)))
}

/// Handle GET /events - Stream feedback cues as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>> {
    let stream = BroadcastStream::new(state.feedback_tx.subscribe()).filter_map(|event| match event {
        Ok(event) => Some(Event::default().event("feedback").json_data(event)),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!("Feedback subscriber lagged, {} cues dropped", skipped);
            None
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /countdown/stream - Stream countdown snapshots
pub async fn countdown_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>> {
    snapshot_stream("countdown", WatchStream::new(state.countdown_tx.subscribe()))
}

/// Handle GET /domination/stream - Stream domination snapshots
pub async fn domination_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>> {
    snapshot_stream("domination", WatchStream::new(state.domination_tx.subscribe()))
}

fn snapshot_stream<T, S>(
    name: &'static str,
    snapshots: S,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>
where
    T: Serialize,
    S: Stream<Item = T> + Send + 'static,
{
    Sse::new(snapshots.map(move |snapshot| Event::default().event(name).json_data(snapshot)))
        .keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return both tools' state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>> {
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        countdown: state.countdown()?,
        domination: state.domination()?,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
