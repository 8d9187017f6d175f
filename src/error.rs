use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum TriviaError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl TriviaError {
    pub fn unprocessable(reason: impl Into<String>) -> Self {
        TriviaError::Unprocessable(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            TriviaError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TriviaError::NotFound => StatusCode::NOT_FOUND,
            TriviaError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            TriviaError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TriviaError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed wire message; internal detail never leaves the process.
    pub fn public_message(&self) -> &'static str {
        match self {
            TriviaError::BadRequest(_) => "bad request",
            TriviaError::NotFound => "resource not found",
            TriviaError::MethodNotAllowed => "method not allowed",
            TriviaError::Unprocessable(_) => "unprocessable",
            TriviaError::DatabaseError(_) => "internal server error",
        }
    }
}

impl IntoResponse for TriviaError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            TriviaError::DatabaseError(e) => error!(error = %e, "store failure"),
            TriviaError::BadRequest(reason) | TriviaError::Unprocessable(reason) => {
                tracing::debug!(status = status.as_u16(), %reason, "request rejected")
            }
            _ => {}
        }
        let body = ApiErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Uniform failure envelope.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: TriviaError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        (status, serde_json::from_slice(&bytes).expect("body should be json"))
    }

    #[tokio::test]
    async fn unprocessable_hides_reason() {
        let (status, body) = render(TriviaError::unprocessable("empty answer")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn database_error_is_generic_500() {
        let (status, body) = render(TriviaError::DatabaseError(SqlxError::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
        assert!(!body.to_string().contains("no rows"));
    }

    #[tokio::test]
    async fn not_found_and_method_not_allowed_envelopes() {
        let (status, body) = render(TriviaError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "resource not found");

        let (status, body) = render(TriviaError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["message"], "method not allowed");
    }
}
