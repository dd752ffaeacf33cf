use crate::domain::VerificationCode;
use axum::Json;
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct CodeResponse {
    /// Fresh 6-digit sharing code
    pub code: String,
}

/// Generate a sharing code
///
/// Codes are not stored. The owner displays the code and polls with it
/// until a request arrives, and may ask for a new one at any time.
#[utoipa::path(
    post,
    path = "/api/codes",
    tag = "codes",
    responses(
        (status = 200, description = "New code", body = CodeResponse)
    )
)]
#[tracing::instrument(name = "Generating a sharing code")]
pub async fn generate_code() -> Json<CodeResponse> {
    Json(CodeResponse {
        code: VerificationCode::generate().to_string(),
    })
}
