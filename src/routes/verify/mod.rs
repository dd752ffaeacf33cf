mod errors;
pub mod poll; // Public for OpenAPI annotations
pub mod post; // Public for OpenAPI annotations
pub mod profile; // Public for OpenAPI annotations
pub mod put; // Public for OpenAPI annotations

pub use errors::VerifyError;
pub use poll::{PollQuery, PollResponse, poll_verification_request};
pub use post::{CreateRequestBody, create_verification_request};
pub use profile::get_verified_profile;
pub use put::{DecideRequestBody, decide_verification_request};
