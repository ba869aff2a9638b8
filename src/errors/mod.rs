//! Unified error handling for the issue aggregation pipeline.

/// Application error type covering authentication, API transport, and
/// record-shape failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Issue {0} has no usable timestamp field")]
    MalformedRecord(String),

    #[error("Unable to determine finding type: {0}")]
    UnresolvableFindingUrl(String),

    #[error("Enrichment failed for issue {id}: {source}")]
    Enrichment {
        id: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Missing configuration: {0}")]
    Config(#[from] std::env::VarError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Check if this error represents a credential failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this error represents a record with no usable timestamp.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord(_))
    }

    /// Check if this error represents an unparseable finding reference.
    pub fn is_unresolvable_url(&self) -> bool {
        matches!(self, Self::UnresolvableFindingUrl(_))
    }
}
