use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RequesterName, VerificationCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("{} is not a valid request status.", other)),
        }
    }
}

/// The owner's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

impl TryFrom<RequestStatus> for Decision {
    type Error = String;

    fn try_from(status: RequestStatus) -> Result<Self, Self::Error> {
        match status {
            RequestStatus::Approved => Ok(Self::Approve),
            RequestStatus::Rejected => Ok(Self::Reject),
            RequestStatus::Pending => {
                Err("A request can only be approved or rejected.".to_string())
            }
        }
    }
}

/// A requester's ask to see an owner's verified profile.
///
/// Serialized in camelCase with the creation time as epoch milliseconds,
/// which is also the on-disk format of the JSON file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub id: Uuid,
    pub code: String,
    pub requester_name: String,
    pub status: RequestStatus,
    /// Creation time in milliseconds since the Unix epoch
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Validated input for a request about to be stored.
#[derive(Debug, Clone)]
pub struct NewVerificationRequest {
    pub code: VerificationCode,
    pub requester_name: RequesterName,
    pub requester_id: Option<String>,
}

impl VerificationRequest {
    pub fn pending(new_request: NewVerificationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: new_request.code.as_ref().to_string(),
            requester_name: new_request.requester_name.as_ref().to_string(),
            status: RequestStatus::Pending,
            // Millisecond precision survives both storage backends unchanged
            timestamp: Utc::now().trunc_subsecs(3),
            requester_id: new_request.requester_id,
            owner_id: None,
        }
    }

    /// Applies the owner's decision. Only a pending request can be decided,
    /// so each request sees at most one terminal transition.
    pub fn decide(&mut self, decision: Decision, owner_id: Option<String>) -> Result<(), RequestStatus> {
        if self.status.is_terminal() {
            return Err(self.status);
        }
        self.status = decision.status();
        if owner_id.is_some() {
            self.owner_id = owner_id;
        }
        Ok(())
    }

    pub fn is_older_than(&self, age: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.timestamp >= age
    }
}
