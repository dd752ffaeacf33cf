//! Persistence for verification requests.
//!
//! Two interchangeable backends sit behind [`RequestStore`]: a flat JSON
//! file and a Postgres table. Both drop requests older than the retention
//! window whenever a new request is created.

mod json_file;
mod postgres;

pub use json_file::JsonFileStore;
pub use postgres::PostgresStore;

use crate::domain::{Decision, VerificationRequest};
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

/// What happened when an owner tried to decide a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    Decided(VerificationRequest),
    /// The request had already left `pending`; it is returned unchanged.
    AlreadyDecided(VerificationRequest),
    NotFound,
}

#[async_trait::async_trait]
pub trait RequestStore: Send + Sync + std::fmt::Debug {
    /// Persists a new request, pruning expired ones first.
    async fn create(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationRequest, anyhow::Error>;

    /// Moves a pending request to its terminal status.
    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        owner_id: Option<String>,
    ) -> Result<DecisionOutcome, anyhow::Error>;

    /// The most recent pending request carrying `code`, if any.
    async fn latest_pending_for_code(
        &self,
        code: &str,
    ) -> Result<Option<VerificationRequest>, anyhow::Error>;

    async fn get(&self, id: Uuid) -> Result<Option<VerificationRequest>, anyhow::Error>;

    /// Deletes every request older than `age` and returns how many went.
    async fn prune_older_than(&self, age: Duration) -> Result<u64, anyhow::Error>;
}

pub(crate) fn chrono_duration(duration: Duration) -> chrono::Duration {
    // chrono caps durations at i64::MAX milliseconds
    let seconds = duration.as_secs().min((i64::MAX / 1000) as u64);
    chrono::Duration::seconds(seconds as i64)
}

/// Requests created at or before this instant have outlived `age`.
pub(crate) fn expiry_cutoff(age: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_signed(chrono_duration(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
