//! Aggregation of issues touched within a time window.
//!
//! Runs the two server-side filtered listings (active and resolved), then
//! labels, re-filters client-side, and deduplicates. Only the surviving ids
//! are returned; full bodies are fetched separately by enrichment so the
//! output reflects the freshest record state.

use std::collections::HashSet;

use crate::client::IssueSource;
use crate::errors::AppError;
use crate::models::issue::IssueQuery;
use crate::services::dedup::deduplicate;
use crate::services::timestamp::time_label;
use crate::services::window::partition_by_cutoff;

/// Collect the ids of all issues created, resolved, or last seen after
/// `cutoff`.
///
/// The resolved listing is concatenated ahead of the active one, so when an
/// id appears in both sets the resolved instance is the one that survives
/// deduplication.
pub async fn issues_touched_since<S: IssueSource>(
    source: &S,
    cutoff: &str,
    critical_only: bool,
) -> Result<HashSet<String>, AppError> {
    let updated = source
        .list_issues(&IssueQuery::updated_since(cutoff, critical_only))
        .await?;
    let resolved = source
        .list_issues(&IssueQuery::resolved_since(cutoff, critical_only))
        .await?;
    tracing::info!(
        active = updated.len(),
        resolved = resolved.len(),
        "Issue listing complete"
    );

    let mut all = resolved;
    all.extend(updated);

    let labeled = all.iter().map(time_label).collect::<Result<Vec<_>, _>>()?;
    let (kept, _discarded) = partition_by_cutoff(labeled, cutoff);
    let surviving = deduplicate(kept);

    Ok(surviving.into_iter().map(|issue| issue.id).collect())
}
