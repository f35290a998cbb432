use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("stack api returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl IntoResponse for DeckError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DeckError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DeckError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DeckError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            DeckError::Api { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
            DeckError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            DeckError::Migration(err) => {
                tracing::error!("Migration error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            DeckError::Serialization(err) => {
                tracing::error!("Serialization error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            DeckError::Http(err) => {
                tracing::error!("Upstream http error: {:?}", err);
                (StatusCode::BAD_GATEWAY, "Upstream request failed".into())
            }
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
