pub mod codes; // Public for OpenAPI annotations
pub mod constants;
pub mod health_check; // Public for OpenAPI annotations
pub mod registry; // Public for OpenAPI annotations
pub mod utils;
pub mod verify; // Public for OpenAPI annotations

pub use codes::generate_code;
pub use health_check::*;
pub use registry::get_registry_profile;
pub use verify::{
    create_verification_request, decide_verification_request, get_verified_profile,
    poll_verification_request,
};
