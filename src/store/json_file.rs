use super::{DecisionOutcome, RequestStore, chrono_duration};
use crate::domain::{Decision, RequestStatus, VerificationRequest};
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Keeps every request in a single JSON array on disk.
///
/// Each operation reads the whole file, and mutations rewrite it through a
/// temporary sibling that is renamed into place. The mutex serializes the
/// read-modify-write cycles of this process. Its guard travels into the
/// blocking task, so a cancelled caller cannot release it mid-write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    request_ttl: Duration,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, request_ttl: Duration) -> Self {
        Self {
            path: path.into(),
            request_ttl,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` against the current contents of the file and writes the
    /// array back if `f` reports it as modified.
    async fn with_requests<F, R>(&self, f: F) -> Result<R, anyhow::Error>
    where
        F: FnOnce(&mut Vec<VerificationRequest>) -> (R, bool) + Send + 'static,
        R: Send + 'static,
    {
        let guard = Arc::clone(&self.lock).lock_owned().await;
        let path = self.path.clone();
        spawn_blocking_with_tracing(move || {
            let _guard = guard;
            let mut requests = read_requests(&path)?;
            let (result, modified) = f(&mut requests);
            if modified {
                write_requests(&path, &requests)?;
            }
            Ok::<R, anyhow::Error>(result)
        })
        .await
        .context("Failed to spawn blocking task.")?
    }
}

fn read_requests(path: &Path) -> Result<Vec<VerificationRequest>, anyhow::Error> {
    if !path.exists() {
        write_requests(path, &[])?;
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request store at {}", path.display()))?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data)
        .with_context(|| format!("Request store at {} is not valid JSON", path.display()))
}

fn write_requests(path: &Path, requests: &[VerificationRequest]) -> Result<(), anyhow::Error> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(requests).context("Failed to serialize requests")?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace request store at {}", path.display()))?;
    Ok(())
}

fn retain_recent(requests: &mut Vec<VerificationRequest>, age: chrono::Duration) -> u64 {
    let now = Utc::now();
    let before = requests.len();
    requests.retain(|r| !r.is_older_than(age, now));
    (before - requests.len()) as u64
}

#[async_trait::async_trait]
impl RequestStore for JsonFileStore {
    #[tracing::instrument(name = "Saving new verification request to file", skip(self, request), fields(request_id = %request.id))]
    async fn create(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationRequest, anyhow::Error> {
        let ttl = chrono_duration(self.request_ttl);
        self.with_requests(move |requests| {
            let pruned = retain_recent(requests, ttl);
            if pruned > 0 {
                tracing::info!(pruned, "Dropped expired verification requests");
            }
            requests.push(request.clone());
            (request, true)
        })
        .await
    }

    #[tracing::instrument(name = "Deciding verification request in file", skip(self))]
    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        owner_id: Option<String>,
    ) -> Result<DecisionOutcome, anyhow::Error> {
        self.with_requests(move |requests| {
            let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
                return (DecisionOutcome::NotFound, false);
            };
            match request.decide(decision, owner_id) {
                Ok(()) => (DecisionOutcome::Decided(request.clone()), true),
                Err(_) => (DecisionOutcome::AlreadyDecided(request.clone()), false),
            }
        })
        .await
    }

    #[tracing::instrument(name = "Fetching latest pending request for code from file", skip(self))]
    async fn latest_pending_for_code(
        &self,
        code: &str,
    ) -> Result<Option<VerificationRequest>, anyhow::Error> {
        let code = code.to_string();
        self.with_requests(move |requests| {
            let latest = requests
                .iter()
                .filter(|r| r.code == code && r.status == RequestStatus::Pending)
                .max_by_key(|r| r.timestamp)
                .cloned();
            (latest, false)
        })
        .await
    }

    #[tracing::instrument(name = "Fetching verification request from file", skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<VerificationRequest>, anyhow::Error> {
        self.with_requests(move |requests| (requests.iter().find(|r| r.id == id).cloned(), false))
            .await
    }

    #[tracing::instrument(name = "Pruning verification requests in file", skip(self))]
    async fn prune_older_than(&self, age: Duration) -> Result<u64, anyhow::Error> {
        let age = chrono_duration(age);
        self.with_requests(move |requests| {
            let pruned = retain_recent(requests, age);
            (pruned, pruned > 0)
        })
        .await
    }
}
