// Maps chart errors onto HTTP responses
use crate::error::ChartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(msg) => {
                tracing::warn!("Rejected chart request: {msg}");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::UnknownHandle(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SurfaceUnavailable(msg) => {
                tracing::warn!("Surface unavailable: {msg}");
                StatusCode::CONFLICT
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
