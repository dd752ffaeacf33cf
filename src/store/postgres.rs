use super::{DecisionOutcome, RequestStore, expiry_cutoff};
use crate::domain::{Decision, RequestStatus, VerificationRequest};
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool};
use std::time::Duration;
use uuid::Uuid;

/// Stores requests in the `verification_requests` table.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    request_ttl: Duration,
}

#[derive(sqlx::FromRow)]
struct VerificationRequestRecord {
    id: Uuid,
    code: String,
    requester_name: String,
    status: String,
    created_at: DateTime<Utc>,
    requester_id: Option<String>,
    owner_id: Option<String>,
}

impl TryFrom<VerificationRequestRecord> for VerificationRequest {
    type Error = anyhow::Error;

    fn try_from(record: VerificationRequestRecord) -> Result<Self, Self::Error> {
        let status = RequestStatus::try_from(record.status.as_str()).map_err(anyhow::Error::msg)?;
        Ok(VerificationRequest {
            id: record.id,
            code: record.code,
            requester_name: record.requester_name,
            status,
            timestamp: record.created_at,
            requester_id: record.requester_id,
            owner_id: record.owner_id,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, code, requester_name, status, created_at, requester_id, owner_id";

impl PostgresStore {
    pub fn new(pool: PgPool, request_ttl: Duration) -> Self {
        Self { pool, request_ttl }
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<VerificationRequest>, anyhow::Error> {
        let record = sqlx::query_as::<_, VerificationRequestRecord>(&format!(
            "SELECT {} FROM verification_requests WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch verification request")?;
        record.map(VerificationRequest::try_from).transpose()
    }
}

#[async_trait::async_trait]
impl RequestStore for PostgresStore {
    #[tracing::instrument(name = "Saving new verification request in the database", skip(self, request), fields(request_id = %request.id))]
    async fn create(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationRequest, anyhow::Error> {
        let cutoff = expiry_cutoff(self.request_ttl, Utc::now());
        let mut transaction = self
            .pool
            .begin()
            .await
            .context("Failed to acquire a Postgres connection from the pool")?;

        let pruned = transaction
            .execute(
                sqlx::query("DELETE FROM verification_requests WHERE created_at <= $1")
                    .bind(cutoff),
            )
            .await
            .context("Failed to prune expired verification requests")?
            .rows_affected();
        if pruned > 0 {
            tracing::info!(pruned, "Dropped expired verification requests");
        }

        let query = sqlx::query(
            r#"
            INSERT INTO verification_requests
                (id, code, requester_name, status, created_at, requester_id, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(request.id)
        .bind(&request.code)
        .bind(&request.requester_name)
        .bind(request.status.as_str())
        .bind(request.timestamp)
        .bind(&request.requester_id)
        .bind(&request.owner_id);
        transaction.execute(query).await.map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        transaction
            .commit()
            .await
            .context("Failed to commit the new verification request")?;
        Ok(request)
    }

    #[tracing::instrument(name = "Deciding verification request in the database", skip(self))]
    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        owner_id: Option<String>,
    ) -> Result<DecisionOutcome, anyhow::Error> {
        // The status guard makes the terminal transition a single atomic step
        let decided = sqlx::query_as::<_, VerificationRequestRecord>(&format!(
            r#"
            UPDATE verification_requests
            SET status = $2, owner_id = COALESCE($3, owner_id)
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(decision.status().as_str())
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update verification request")?;

        if let Some(record) = decided {
            return Ok(DecisionOutcome::Decided(record.try_into()?));
        }
        match self.fetch_by_id(id).await? {
            Some(existing) => Ok(DecisionOutcome::AlreadyDecided(existing)),
            None => Ok(DecisionOutcome::NotFound),
        }
    }

    #[tracing::instrument(name = "Fetching latest pending request for code from the database", skip(self))]
    async fn latest_pending_for_code(
        &self,
        code: &str,
    ) -> Result<Option<VerificationRequest>, anyhow::Error> {
        let record = sqlx::query_as::<_, VerificationRequestRecord>(&format!(
            r#"
            SELECT {}
            FROM verification_requests
            WHERE code = $1 AND status = 'pending'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            SELECT_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch pending verification request")?;
        record.map(VerificationRequest::try_from).transpose()
    }

    #[tracing::instrument(name = "Fetching verification request from the database", skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<VerificationRequest>, anyhow::Error> {
        self.fetch_by_id(id).await
    }

    #[tracing::instrument(name = "Pruning verification requests in the database", skip(self))]
    async fn prune_older_than(&self, age: Duration) -> Result<u64, anyhow::Error> {
        let cutoff = expiry_cutoff(age, Utc::now());
        let result = sqlx::query("DELETE FROM verification_requests WHERE created_at <= $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .context("Failed to prune verification requests")?;
        Ok(result.rows_affected())
    }
}
