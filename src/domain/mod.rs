mod my_kad;
mod requester_name;
mod verification_code;
mod verification_request;

pub use my_kad::MyKad;
pub use requester_name::{DEFAULT_REQUESTER_NAME, RequesterName};
pub use verification_code::{VERIFICATION_CODE_LENGTH, VerificationCode};
pub use verification_request::{
    Decision, NewVerificationRequest, RequestStatus, VerificationRequest,
};
