//! Shared utility functions for route handlers

use uuid::Uuid;

/// Treats missing and blank values alike, the way the polling clients do.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses a request id. Malformed ids can never match a stored request,
/// so callers report them as "not found".
///
/// Accepts both standard UUID format (with hyphens) and simple format (32 hex chars without hyphens).
pub fn parse_request_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}
