use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum FrasesError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("authorization required")]
    Unauthorized,

    #[error("no quote matches the requested filter")]
    NoMatch,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("queue error: {0}")]
    Queue(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FrasesError>;

impl IntoResponse for FrasesError {
    fn into_response(self) -> Response {
        let status = match self {
            FrasesError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FrasesError::Unauthorized => StatusCode::UNAUTHORIZED,
            FrasesError::NoMatch => StatusCode::NOT_FOUND,
            FrasesError::Io(_)
            | FrasesError::Serialization(_)
            | FrasesError::Queue(_)
            | FrasesError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server faults go to the log; clients get a generic detail.
        let detail = if status.is_server_error() {
            error!("{}", self);
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
