//! src/request_sweeper.rs
use crate::configuration::StoreSettings;
use crate::store::RequestStore;
use std::sync::Arc;
use std::time::Duration;

pub enum ExecutionOutcome {
    RequestsPruned(u64),
    NothingToPrune,
}

/// Shares the server's store so that file-backed writes stay serialized.
pub async fn run_sweeper_until_stopped(
    store: Arc<dyn RequestStore>,
    settings: StoreSettings,
) -> Result<(), anyhow::Error> {
    sweeper_loop(store, settings.request_ttl(), settings.sweep_interval()).await
}

async fn sweeper_loop(
    store: Arc<dyn RequestStore>,
    request_ttl: Duration,
    sweep_interval: Duration,
) -> Result<(), anyhow::Error> {
    loop {
        match try_execute_sweep(store.as_ref(), request_ttl).await {
            Ok(_) => {
                tokio::time::sleep(sweep_interval).await;
            }
            Err(_) => {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

#[tracing::instrument(skip_all, fields(pruned = tracing::field::Empty), err)]
pub async fn try_execute_sweep(
    store: &dyn RequestStore,
    request_ttl: Duration,
) -> Result<ExecutionOutcome, anyhow::Error> {
    let pruned = store.prune_older_than(request_ttl).await?;
    tracing::Span::current().record("pruned", pruned);
    if pruned == 0 {
        return Ok(ExecutionOutcome::NothingToPrune);
    }
    tracing::info!("Removed expired verification requests");
    Ok(ExecutionOutcome::RequestsPruned(pruned))
}
