//! Common constants used across route handlers

/// Generic error message for internal server errors
pub const ERROR_SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// Error message when a verification request does not exist
pub const ERROR_REQUEST_NOT_FOUND: &str = "Request not found";

/// Error message when an update lacks the request id or the new status
pub const ERROR_ID_AND_STATUS_REQUIRED: &str = "ID and status are required";

/// Error message when a poll carries neither `code` nor `requestId`
pub const ERROR_MISSING_PARAMETERS: &str = "Missing parameters";

/// Error message when an approved request's owner is not in the registry
pub const ERROR_OWNER_NOT_FOUND: &str = "Owner profile not found";

/// Error message when a MyKad number is not in the registry
pub const ERROR_USER_NOT_FOUND: &str = "User not found";
