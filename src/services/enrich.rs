//! Bounded-concurrency enrichment: fetch full issue bodies by id.
//!
//! All ids are dispatched up front; a semaphore caps in-flight fetches at
//! the configured width. The call joins every task before returning, and a
//! single failed fetch fails the whole batch. There is no per-item timeout.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::client::IssueSource;
use crate::errors::AppError;
use crate::models::issue::Issue;
use crate::services::timestamp::time_label;

/// Fetch and label the full body of every issue in `ids`.
///
/// Output order is unspecified. Any fetch failure aborts the batch with
/// `AppError::Enrichment` naming the failing id; remaining in-flight
/// fetches are dropped with the `JoinSet`.
pub async fn describe_all<S>(
    source: Arc<S>,
    ids: HashSet<String>,
    concurrency: usize,
) -> Result<Vec<Issue>, AppError>
where
    S: IssueSource + 'static,
{
    tracing::debug!(
        concurrency,
        count = ids.len(),
        "Describing all issues"
    );
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for id in ids {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let issue = source.get_issue(&id).await.map_err(|e| AppError::Enrichment {
                id: id.clone(),
                source: Box::new(e),
            })?;
            time_label(&issue)
        });
    }

    let mut described = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let issue =
            joined.map_err(|e| AppError::Internal(format!("enrichment task failed: {e}")))??;
        described.push(issue);
    }
    Ok(described)
}
