use super::VerifyError;
use crate::domain::VerificationRequest;
use crate::routes::constants::ERROR_MISSING_PARAMETERS;
use crate::routes::utils::{non_blank, parse_request_id};
use crate::startup::AppState;
use anyhow::Context;
use axum::Json;
use axum::extract::{Query, State};
use serde::Serialize;

#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PollQuery {
    /// Owner side: the code currently on display
    code: Option<String>,
    /// Requester side: the id returned when the request was created
    request_id: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PollResponse {
    /// `null` when the owner has no pending request for the code
    pub request: Option<VerificationRequest>,
}

/// Poll for request changes
///
/// Owners poll with `code` for the newest pending request. Requesters poll
/// with `requestId` for the status of their own request. `code` wins when
/// both are present.
#[utoipa::path(
    get,
    path = "/api/verify/poll",
    tag = "verify",
    params(PollQuery),
    responses(
        (status = 200, description = "Current state", body = PollResponse),
        (status = 400, description = "Neither code nor requestId given"),
        (status = 404, description = "Request not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(name = "Polling verification requests", skip(state))]
pub async fn poll_verification_request(
    State(state): State<AppState>,
    Query(query): Query<PollQuery>,
) -> Result<Json<PollResponse>, VerifyError> {
    if let Some(code) = non_blank(query.code) {
        let request = state
            .store
            .latest_pending_for_code(code.trim())
            .await
            .context("Failed to look up pending requests for a code")?;
        return Ok(Json(PollResponse { request }));
    }

    if let Some(request_id) = non_blank(query.request_id) {
        let id = parse_request_id(&request_id).ok_or(VerifyError::RequestNotFound)?;
        let request = state
            .store
            .get(id)
            .await
            .context("Failed to fetch the verification request")?
            .ok_or(VerifyError::RequestNotFound)?;
        return Ok(Json(PollResponse {
            request: Some(request),
        }));
    }

    Err(VerifyError::ValidationError(
        ERROR_MISSING_PARAMETERS.to_string(),
    ))
}
