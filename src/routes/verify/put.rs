use super::VerifyError;
use crate::domain::{Decision, RequestStatus, VerificationRequest};
use crate::routes::constants::ERROR_ID_AND_STATUS_REQUIRED;
use crate::routes::utils::{non_blank, parse_request_id};
use crate::startup::AppState;
use crate::store::DecisionOutcome;
use anyhow::Context;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

#[derive(serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecideRequestBody {
    id: Option<String>,
    /// Either "approved" or "rejected"
    status: Option<String>,
    /// Registry user id or MyKad of the deciding owner
    owner_id: Option<String>,
}

/// Approve or reject a pending request
///
/// A request is decided at most once; later attempts are refused and leave
/// the stored request unchanged.
#[utoipa::path(
    put,
    path = "/api/verify",
    tag = "verify",
    request_body = DecideRequestBody,
    responses(
        (status = 200, description = "Request decided", body = VerificationRequest),
        (status = 400, description = "Missing id or status, or status is not a decision"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request was already decided"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(name = "Deciding a verification request", skip(state, body))]
pub async fn decide_verification_request(
    State(state): State<AppState>,
    body: Result<Json<DecideRequestBody>, JsonRejection>,
) -> Result<Json<VerificationRequest>, VerifyError> {
    let Json(body) = body?;
    let (Some(id), Some(status)) = (non_blank(body.id), non_blank(body.status)) else {
        return Err(VerifyError::ValidationError(
            ERROR_ID_AND_STATUS_REQUIRED.to_string(),
        ));
    };
    let decision = RequestStatus::try_from(status.as_str())
        .and_then(Decision::try_from)
        .map_err(VerifyError::ValidationError)?;
    let id = parse_request_id(&id).ok_or(VerifyError::RequestNotFound)?;

    let outcome = state
        .store
        .decide(id, decision, non_blank(body.owner_id))
        .await
        .context("Failed to update the verification request")?;
    match outcome {
        DecisionOutcome::Decided(request) => {
            tracing::info!(request_id = %request.id, status = %request.status, "Verification request decided");
            Ok(Json(request))
        }
        DecisionOutcome::AlreadyDecided(request) => Err(VerifyError::AlreadyDecided(request.status)),
        DecisionOutcome::NotFound => Err(VerifyError::RequestNotFound),
    }
}
