//! Error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::responses::ErrorResponse;

/// Errors surfaced at the HTTP input boundary. The engines themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("countdown must be longer than zero seconds")]
    InvalidDuration,

    #[error("minutes must be between 0 and 999, got {0}")]
    InvalidMinutes(u32),

    #[error("seconds must be between 0 and 59, got {0}")]
    InvalidSeconds(u32),

    #[error("fill duration must be between 1 and 3600 seconds, got {0}")]
    InvalidFillDuration(f64),

    #[error("switch index must be between 0 and 8, got {0}")]
    InvalidSwitch(usize),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{0} state unavailable")]
    StateUnavailable(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::StateUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
