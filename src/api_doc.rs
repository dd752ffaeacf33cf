use utoipa::OpenApi;

use crate::domain::{RequestStatus, VerificationRequest};
use crate::registry::MockUser;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TrustBridge",
        description = "Peer-to-peer identity verification with one-time codes"
    ),
    paths(
        routes::health_check::health_check,
        routes::codes::generate_code,
        routes::registry::get_registry_profile,
        routes::verify::post::create_verification_request,
        routes::verify::put::decide_verification_request,
        routes::verify::poll::poll_verification_request,
        routes::verify::profile::get_verified_profile,
    ),
    components(
        schemas(
            VerificationRequest,
            RequestStatus,
            MockUser,
            routes::codes::CodeResponse,
            routes::verify::CreateRequestBody,
            routes::verify::DecideRequestBody,
            routes::verify::PollResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "codes", description = "Sharing code generation"),
        (name = "registry", description = "Mock national identity registry"),
        (name = "verify", description = "Verification request lifecycle"),
    )
)]
pub struct ApiDoc;
