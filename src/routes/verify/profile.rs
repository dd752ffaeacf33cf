use super::VerifyError;
use crate::domain::RequestStatus;
use crate::registry::MockUser;
use crate::routes::utils::parse_request_id;
use crate::startup::AppState;
use anyhow::Context;
use axum::Json;
use axum::extract::{Path, State};

/// View the owner's verified profile
///
/// Only available once the owner approved the request.
#[utoipa::path(
    get,
    path = "/api/verify/{id}/profile",
    tag = "verify",
    params(
        ("id" = String, Path, description = "Verification request id")
    ),
    responses(
        (status = 200, description = "Owner profile", body = MockUser),
        (status = 403, description = "Request is pending or was rejected"),
        (status = 404, description = "Request or owner not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(name = "Fetching verified profile", skip(state))]
pub async fn get_verified_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MockUser>, VerifyError> {
    let id = parse_request_id(&id).ok_or(VerifyError::RequestNotFound)?;
    let request = state
        .store
        .get(id)
        .await
        .context("Failed to fetch the verification request")?
        .ok_or(VerifyError::RequestNotFound)?;

    if request.status != RequestStatus::Approved {
        return Err(VerifyError::NotApproved(request.status));
    }

    let owner = request
        .owner_id
        .as_deref()
        .and_then(|owner_id| state.registry.resolve_owner(owner_id))
        .ok_or(VerifyError::OwnerNotFound)?;
    Ok(Json(owner.clone()))
}
