//! Client-side time window filtering.
//!
//! Server-side listing filters are inclusive (`>=`) and apply to different
//! fields per query, so every labeled record is re-checked here with a
//! strict `>` against the derived `tstamp`. Records exactly at the cutoff
//! are discarded, which avoids redelivering them on a boundary re-run.

use crate::models::issue::Issue;

/// Partition labeled issues into (kept, discarded) around `cutoff`.
///
/// Keeps an issue iff `tstamp > cutoff` (strict lexicographic comparison).
/// Discards are logged individually at debug with a summary at info.
pub fn partition_by_cutoff(issues: Vec<Issue>, cutoff: &str) -> (Vec<Issue>, Vec<Issue>) {
    let (kept, discarded): (Vec<Issue>, Vec<Issue>) = issues
        .into_iter()
        .partition(|issue| matches!(issue.tstamp.as_deref(), Some(t) if t > cutoff));

    if !discarded.is_empty() {
        tracing::info!(count = discarded.len(), "Discarding issues outside of time range");
    }
    for issue in &discarded {
        tracing::debug!(
            id = %issue.id,
            tstamp = issue.tstamp.as_deref().unwrap_or(""),
            "Issue out of time range (discarding)"
        );
    }
    (kept, discarded)
}
