//! Issue record model and server-side listing filters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle states included in every listing query. The platform treats
/// retired and missing assets as still reportable.
pub const ISSUE_STATES: &str = "active,inactive,missing,retired";

/// A security issue as returned by the platform API.
///
/// Only the identity and lifecycle timestamps are modeled; everything else
/// the API sends is preserved verbatim in `extra` so enriched output loses
/// no payload data. `tstamp` is absent until the record has been labeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub created_at: Option<String>,
    pub resolved_at: Option<String>,
    pub last_seen_at: Option<String>,
    /// Most recent activity timestamp, derived by labeling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tstamp: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Listing status filter: the API exposes active and resolved issues as two
/// disjoint result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Active,
    Resolved,
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// Server-side filters for an issue listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueQuery {
    pub status: IssueStatus,
    pub state: String,
    pub critical: bool,
    pub last_seen_at_gte: Option<String>,
    pub resolved_at_gte: Option<String>,
}

impl IssueQuery {
    /// Active issues touched since `cutoff` (inclusive, by `last_seen_at`).
    pub fn updated_since(cutoff: &str, critical_only: bool) -> Self {
        Self {
            status: IssueStatus::Active,
            state: ISSUE_STATES.to_string(),
            critical: critical_only,
            last_seen_at_gte: Some(cutoff.to_string()),
            resolved_at_gte: None,
        }
    }

    /// Resolved issues closed since `cutoff` (inclusive, by `resolved_at`).
    pub fn resolved_since(cutoff: &str, critical_only: bool) -> Self {
        Self {
            status: IssueStatus::Resolved,
            state: ISSUE_STATES.to_string(),
            critical: critical_only,
            last_seen_at_gte: None,
            resolved_at_gte: Some(cutoff.to_string()),
        }
    }

    /// Project the filters into query-string pairs.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("status", self.status.to_string()),
            ("state", self.state.clone()),
        ];
        if self.critical {
            params.push(("critical", "true".to_string()));
        }
        if let Some(ts) = &self.last_seen_at_gte {
            params.push(("last_seen_at_gte", ts.clone()));
        }
        if let Some(ts) = &self.resolved_at_gte {
            params.push(("resolved_at_gte", ts.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_preserves_unmodeled_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "abc123",
            "created_at": "2020-01-01T00:00:00Z",
            "resolved_at": null,
            "last_seen_at": "2020-03-01T00:00:00Z",
            "issue_type": "sva",
            "critical": true
        }))
        .unwrap();
        assert_eq!(issue.id, "abc123");
        assert_eq!(issue.extra["issue_type"], "sva");

        let round = serde_json::to_value(&issue).unwrap();
        assert_eq!(round["critical"], true);
        // Unlabeled issue serializes without a tstamp key
        assert!(round.get("tstamp").is_none());
    }

    #[test]
    fn issue_missing_timestamps_deserialize_as_none() {
        let issue: Issue = serde_json::from_value(json!({ "id": "abc123" })).unwrap();
        assert!(issue.created_at.is_none());
        assert!(issue.resolved_at.is_none());
        assert!(issue.last_seen_at.is_none());
        assert!(issue.tstamp.is_none());
    }

    #[test]
    fn updated_query_filters_on_last_seen() {
        let query = IssueQuery::updated_since("2020-06-01T00:00:00Z", true);
        let params = query.to_params();
        assert!(params.contains(&("status", "active".to_string())));
        assert!(params.contains(&("critical", "true".to_string())));
        assert!(params.contains(&("last_seen_at_gte", "2020-06-01T00:00:00Z".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "resolved_at_gte"));
    }

    #[test]
    fn resolved_query_filters_on_resolved_at() {
        let query = IssueQuery::resolved_since("2020-06-01T00:00:00Z", false);
        let params = query.to_params();
        assert!(params.contains(&("status", "resolved".to_string())));
        assert!(params.contains(&("resolved_at_gte", "2020-06-01T00:00:00Z".to_string())));
        // critical filter only applies when critical_only is set
        assert!(!params.iter().any(|(k, _)| *k == "critical"));
    }

    #[test]
    fn state_filter_covers_all_lifecycle_states() {
        let query = IssueQuery::updated_since("2020-06-01T00:00:00Z", true);
        assert_eq!(query.state, "active,inactive,missing,retired");
    }
}
