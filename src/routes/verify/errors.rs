use crate::domain::RequestStatus;
use crate::routes::constants::{ERROR_OWNER_NOT_FOUND, ERROR_REQUEST_NOT_FOUND, ERROR_SOMETHING_WENT_WRONG};
use crate::telemetry::error_chain_fmt;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(thiserror::Error)]
pub enum VerifyError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{}", ERROR_REQUEST_NOT_FOUND)]
    RequestNotFound,
    #[error("Request has already been {0}")]
    AlreadyDecided(RequestStatus),
    #[error("Request is {0}, the profile is only shared once approved")]
    NotApproved(RequestStatus),
    #[error("{}", ERROR_OWNER_NOT_FOUND)]
    OwnerNotFound,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<JsonRejection> for VerifyError {
    fn from(rejection: JsonRejection) -> Self {
        VerifyError::ValidationError(rejection.body_text())
    }
}

impl VerifyError {
    fn status_code(&self) -> StatusCode {
        match self {
            VerifyError::ValidationError(_) => StatusCode::BAD_REQUEST,
            VerifyError::RequestNotFound | VerifyError::OwnerNotFound => StatusCode::NOT_FOUND,
            VerifyError::AlreadyDecided(_) => StatusCode::CONFLICT,
            VerifyError::NotApproved(_) => StatusCode::FORBIDDEN,
            VerifyError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        let message = match &self {
            VerifyError::UnexpectedError(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Verification request handling failed"
                );
                ERROR_SOMETHING_WENT_WRONG.to_string()
            }
            other => other.to_string(),
        };
        (
            self.status_code(),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}
