use axum::http::StatusCode;

/// Liveness probe
///
/// Answers 200 with an empty body while the server accepts connections.
/// The request store is not probed.
#[utoipa::path(
    get,
    path = "/health_check",
    tag = "health",
    responses(
        (status = 200, description = "Server is accepting connections")
    )
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
