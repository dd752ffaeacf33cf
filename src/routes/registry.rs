use crate::domain::MyKad;
use crate::registry::MockUser;
use crate::routes::constants::ERROR_USER_NOT_FOUND;
use crate::startup::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("{0}")]
    InvalidMyKad(String),
    #[error("{}", ERROR_USER_NOT_FOUND)]
    UnknownMyKad,
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match self {
            RegistryError::InvalidMyKad(_) => StatusCode::BAD_REQUEST,
            RegistryError::UnknownMyKad => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Look up a registry profile
///
/// Fetches the official profile for a MyKad number from the mock national
/// registry. Dashes in the number are optional.
#[utoipa::path(
    get,
    path = "/api/registry/{my_kad}",
    tag = "registry",
    params(
        ("my_kad" = String, Path, description = "12-digit MyKad number")
    ),
    responses(
        (status = 200, description = "Registry profile", body = MockUser),
        (status = 400, description = "Malformed MyKad number"),
        (status = 404, description = "No profile for this MyKad"),
    )
)]
#[tracing::instrument(name = "Looking up registry profile", skip(state))]
pub async fn get_registry_profile(
    State(state): State<AppState>,
    Path(my_kad): Path<String>,
) -> Result<Json<MockUser>, RegistryError> {
    let my_kad = MyKad::parse(&my_kad).map_err(RegistryError::InvalidMyKad)?;
    state
        .registry
        .find_by_my_kad(&my_kad)
        .cloned()
        .map(Json)
        .ok_or(RegistryError::UnknownMyKad)
}
