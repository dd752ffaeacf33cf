use super::VerifyError;
use crate::domain::{NewVerificationRequest, RequesterName, VerificationCode, VerificationRequest};
use crate::routes::utils::non_blank;
use crate::startup::AppState;
use anyhow::Context;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::field::display;

#[derive(serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    /// The 6-digit code the owner shared
    code: Option<String>,
    /// Display name shown to the owner, defaults to "Someone"
    requester_name: Option<String>,
    requester_id: Option<String>,
}

impl TryFrom<CreateRequestBody> for NewVerificationRequest {
    type Error = String;

    fn try_from(value: CreateRequestBody) -> Result<Self, Self::Error> {
        let code = VerificationCode::parse(value.code.unwrap_or_default())?;
        let requester_name = RequesterName::parse_or_default(value.requester_name)?;
        Ok(Self {
            code,
            requester_name,
            requester_id: non_blank(value.requester_id),
        })
    }
}

/// Request access to an owner's profile
///
/// Creates a pending verification request for the code the owner shared.
/// Duplicate submissions create duplicate requests.
#[utoipa::path(
    post,
    path = "/api/verify",
    tag = "verify",
    request_body = CreateRequestBody,
    responses(
        (status = 200, description = "Pending request created", body = VerificationRequest),
        (status = 400, description = "Code missing or malformed"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(
    name = "Creating a verification request",
    skip(state, body),
    fields(code = tracing::field::Empty, request_id = tracing::field::Empty)
)]
pub async fn create_verification_request(
    State(state): State<AppState>,
    body: Result<Json<CreateRequestBody>, JsonRejection>,
) -> Result<Json<VerificationRequest>, VerifyError> {
    let Json(body) = body?;
    let new_request: NewVerificationRequest =
        body.try_into().map_err(VerifyError::ValidationError)?;
    let request = VerificationRequest::pending(new_request);
    tracing::Span::current()
        .record("code", display(&request.code))
        .record("request_id", display(&request.id));

    let saved = state
        .store
        .create(request)
        .await
        .context("Failed to store the verification request")?;
    Ok(Json(saved))
}
