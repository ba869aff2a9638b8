//! Timestamp labeling: derive a single "most recent activity" timestamp.
//!
//! The API emits uniform ISO-8601 strings (same precision, UTC), so the
//! newest of `created_at`, `resolved_at`, and `last_seen_at` is the
//! lexicographic maximum. No structured time parsing happens here.

use crate::errors::AppError;
use crate::models::issue::Issue;

/// Return a copy of `issue` with `tstamp` set to the newest of its
/// lifecycle timestamps.
///
/// Fails with `AppError::MalformedRecord` when all three fields are null;
/// a record with no timestamp at all cannot be window-filtered.
pub fn time_label(issue: &Issue) -> Result<Issue, AppError> {
    let newest = [&issue.created_at, &issue.resolved_at, &issue.last_seen_at]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .max();
    match newest {
        Some(tstamp) => {
            let mut labeled = issue.clone();
            labeled.tstamp = Some(tstamp.to_string());
            Ok(labeled)
        }
        None => Err(AppError::MalformedRecord(issue.id.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(created: Option<&str>, resolved: Option<&str>, seen: Option<&str>) -> Issue {
        serde_json::from_value(json!({
            "id": "abc123",
            "created_at": created,
            "resolved_at": resolved,
            "last_seen_at": seen,
        }))
        .unwrap()
    }

    #[test]
    fn label_picks_newest_timestamp() {
        let labeled = time_label(&issue(
            Some("2020-01-01T00:00:00Z"),
            None,
            Some("2020-03-01T00:00:00Z"),
        ))
        .unwrap();
        assert_eq!(labeled.tstamp.as_deref(), Some("2020-03-01T00:00:00Z"));
    }

    #[test]
    fn label_result_independent_of_field_position() {
        let a = time_label(&issue(Some("2020-04-01T00:00:00Z"), Some("2020-01-01T00:00:00Z"), None))
            .unwrap();
        let b = time_label(&issue(Some("2020-01-01T00:00:00Z"), Some("2020-04-01T00:00:00Z"), None))
            .unwrap();
        assert_eq!(a.tstamp, b.tstamp);
    }

    #[test]
    fn label_with_single_field() {
        let labeled = time_label(&issue(None, Some("2020-04-01T00:00:00Z"), None)).unwrap();
        assert_eq!(labeled.tstamp.as_deref(), Some("2020-04-01T00:00:00Z"));
    }

    #[test]
    fn label_does_not_mutate_input() {
        let original = issue(Some("2020-01-01T00:00:00Z"), None, None);
        let labeled = time_label(&original).unwrap();
        assert!(original.tstamp.is_none());
        assert!(labeled.tstamp.is_some());
        assert_eq!(labeled.id, original.id);
    }

    #[test]
    fn label_fails_when_all_fields_null() {
        let err = time_label(&issue(None, None, None)).unwrap_err();
        assert!(err.is_malformed_record());
    }
}
