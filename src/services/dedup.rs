//! Deduplication by issue id, preserving first-occurrence order.
//!
//! An issue resolved within the window appears in both the resolved and the
//! active listing; the first instance seen wins.

use std::collections::HashSet;

use crate::models::issue::Issue;

/// Drop every issue whose id was already seen earlier in the sequence.
pub fn deduplicate(mut issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen = HashSet::new();
    issues.retain(|issue| seen.insert(issue.id.clone()));
    issues
}
