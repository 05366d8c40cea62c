//! API error type and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sassmeter_core::SessionId;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Quiz(#[from] sassmeter_core::Error),

    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use sassmeter_core::Error as QuizError;

        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Quiz(QuizError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            ApiError::Quiz(
                QuizError::InvalidInput(_)
                | QuizError::OptionOutOfRange { .. }
                | QuizError::RatingOutOfRange(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Quiz(QuizError::UnknownQuestion(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
