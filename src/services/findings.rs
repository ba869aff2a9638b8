//! Finding reference resolution.
//!
//! A finding URL points either at a scan-associated finding
//! (`.../scans/{scan_id}/findings/{finding_id}`) or an event-associated one
//! (`.../events/{event_id}`). Finding URLs arrive from external input, so an
//! unrecognized reference is logged and resolved to `None` rather than
//! failing the caller.

use regex::Regex;
use serde_json::Value;

use crate::client::IssueSource;
use crate::errors::AppError;

const SCAN_FINDING_PATTERN: &str =
    r"^https://\w+\.cloudpassage\.com/v\d/scans/(?P<scan_id>[A-Za-z0-9]+)/findings/(?P<finding_id>[A-Za-z0-9]+)$";

/// Extract `(scan_id, finding_id)` from a scan finding URL.
pub fn parse_finding_url(url: &str) -> Result<(String, String), AppError> {
    let pattern = Regex::new(SCAN_FINDING_PATTERN)?;
    let captures = pattern
        .captures(url)
        .ok_or_else(|| AppError::UnresolvableFindingUrl(url.to_string()))?;
    Ok((
        captures["scan_id"].to_string(),
        captures["finding_id"].to_string(),
    ))
}

/// Resolve a finding URL to its full record, or `None` when the reference
/// matches neither known pattern.
pub async fn describe_finding<S: IssueSource>(
    source: &S,
    finding_url: &str,
) -> Result<Option<Value>, AppError> {
    if finding_url.contains("/scans/") {
        let (scan_id, finding_id) = match parse_finding_url(finding_url) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(url = finding_url, error = %e, "Unable to parse finding URL");
                return Ok(None);
            }
        };
        let finding = source
            .get_raw(&format!("/v1/scans/{scan_id}/findings/{finding_id}"))
            .await?;
        Ok(Some(finding))
    } else if finding_url.contains("/events/") {
        let event_id = finding_url.rsplit('/').next().unwrap_or_default();
        let finding = source.get_raw(&format!("/v1/events/{event_id}")).await?;
        Ok(Some(finding))
    } else {
        tracing::error!(url = finding_url, "Unable to determine finding type");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_and_finding_ids() {
        let (scan_id, finding_id) =
            parse_finding_url("https://x.cloudpassage.com/v1/scans/AAA111/findings/BBB222")
                .unwrap();
        assert_eq!(scan_id, "AAA111");
        assert_eq!(finding_id, "BBB222");
    }

    #[test]
    fn rejects_wrong_host() {
        let err = parse_finding_url("https://x.example.com/v1/scans/AAA111/findings/BBB222")
            .unwrap_err();
        assert!(err.is_unresolvable_url());
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err =
            parse_finding_url("https://x.cloudpassage.com/v1/scans/AAA111/findings/BBB222/extra")
                .unwrap_err();
        assert!(err.is_unresolvable_url());
    }

    #[test]
    fn rejects_non_alphanumeric_ids() {
        let err = parse_finding_url("https://x.cloudpassage.com/v1/scans/AAA-111/findings/BBB222")
            .unwrap_err();
        assert!(err.is_unresolvable_url());
    }
}
