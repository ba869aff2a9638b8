//! High-level aggregation surface over an issue source.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{HaloClient, IssueSource};
use crate::config::HaloConfig;
use crate::errors::AppError;
use crate::models::issue::Issue;
use crate::services::{aggregator, enrich, findings};

/// Aggregates and enriches issues from a source.
///
/// Construct over the production client with [`HaloIssues::connect`], or
/// over any [`IssueSource`] (e.g. a test double) with
/// [`HaloIssues::with_source`].
#[derive(Debug, Clone)]
pub struct HaloIssues<S: IssueSource> {
    source: Arc<S>,
    concurrency: usize,
}

impl HaloIssues<HaloClient> {
    /// Build and authenticate a client from configuration.
    ///
    /// Bad credentials are fatal here; nothing downstream can work without
    /// a token.
    pub async fn connect(config: &HaloConfig) -> Result<Self, AppError> {
        let mut client = HaloClient::new(config)?;
        if let Err(e) = client.authenticate().await {
            tracing::error!(error = %e, "Bad Halo API credentials");
            return Err(e);
        }
        Ok(Self {
            source: Arc::new(client),
            concurrency: config.describe_threads,
        })
    }
}

impl<S: IssueSource + 'static> HaloIssues<S> {
    pub fn with_source(source: S, concurrency: usize) -> Self {
        Self {
            source: Arc::new(source),
            concurrency,
        }
    }

    /// Return the full, labeled body of every issue touched since `since`.
    ///
    /// Aggregation first reduces the two listings to a deduplicated id set,
    /// then enrichment fetches each body with bounded concurrency. The
    /// result carries one record per id, each with a `tstamp` field.
    pub async fn describe_all_issues(
        &self,
        since: &str,
        critical_only: bool,
    ) -> Result<Vec<Issue>, AppError> {
        let ids = aggregator::issues_touched_since(self.source.as_ref(), since, critical_only)
            .await?;
        enrich::describe_all(Arc::clone(&self.source), ids, self.concurrency).await
    }

    /// Resolve a scan or event finding URL to its full record.
    pub async fn describe_finding(&self, finding_url: &str) -> Result<Option<Value>, AppError> {
        findings::describe_finding(self.source.as_ref(), finding_url).await
    }
}
