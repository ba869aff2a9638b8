//! REST client for the Halo platform API.
//!
//! `IssueSource` is the capability the aggregation pipeline consumes;
//! `HaloClient` is the production implementation over HTTPS. The client is
//! immutable after `authenticate`, so it is safe to share across the
//! enrichment workers without further synchronization.

use std::future::Future;

use serde::Deserialize;
use serde_json::Value;

use crate::config::HaloConfig;
use crate::errors::AppError;
use crate::models::issue::{Issue, IssueQuery};

/// Page size for issue listings.
const PER_PAGE: usize = 100;

/// Record source consumed by the aggregation pipeline.
///
/// Futures are `Send` so implementations can be driven from spawned tasks.
pub trait IssueSource: Send + Sync {
    /// Server-side filtered issue listing.
    fn list_issues(
        &self,
        query: &IssueQuery,
    ) -> impl Future<Output = Result<Vec<Issue>, AppError>> + Send;

    /// Full issue body by id.
    fn get_issue(&self, id: &str) -> impl Future<Output = Result<Issue, AppError>> + Send;

    /// Generic GET against an API path, returning raw JSON.
    fn get_raw(&self, path: &str) -> impl Future<Output = Result<Value, AppError>> + Send;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct IssuePage {
    #[serde(default)]
    issues: Vec<Issue>,
}

/// HTTPS client holding the OAuth bearer token for the platform API.
#[derive(Debug, Clone)]
pub struct HaloClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    token: String,
}

impl HaloClient {
    pub fn new(config: &HaloConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(integration_string())
            .build()?;
        // A bare hostname gets https; an explicit scheme (e.g. a local test
        // server over http) is used as-is.
        let base_url = if config.api_host.contains("://") {
            config.api_host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", config.api_host)
        };
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            token: String::new(),
        })
    }

    /// Exchange API credentials for a bearer token.
    ///
    /// Must be called before any listing or fetch; a 401 from the token
    /// endpoint means bad credentials and is fatal.
    pub async fn authenticate(&mut self) -> Result<(), AppError> {
        let url = format!(
            "{}/oauth/access_token?grant_type=client_credentials",
            self.base_url
        );
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Authentication(
                "Halo API rejected key/secret".to_string(),
            ));
        }
        let response = error_for_status(response).await?;
        let token: TokenResponse = response.json().await?;
        self.token = token.access_token;
        Ok(())
    }
}

impl IssueSource for HaloClient {
    /// Walk `/v2/issues` pages until a short page, accumulating all records.
    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, AppError> {
        let url = format!("{}/v2/issues", self.base_url);
        let mut all = Vec::new();
        let mut page = 1usize;
        loop {
            let response = self
                .http
                .get(&url)
                .bearer_auth(&self.token)
                .query(&query.to_params())
                .query(&[("page", page.to_string()), ("per_page", PER_PAGE.to_string())])
                .send()
                .await?;
            let response = error_for_status(response).await?;
            let body: IssuePage = response.json().await?;
            let count = body.issues.len();
            all.extend(body.issues);
            if count < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    async fn get_issue(&self, id: &str) -> Result<Issue, AppError> {
        let body = self.get_raw(&format!("/v2/issues/{id}")).await?;
        // The API wraps single records in an "issue" envelope key.
        let record = match body.get("issue") {
            Some(inner) => inner.clone(),
            None => body,
        };
        Ok(serde_json::from_value(record)?)
    }

    async fn get_raw(&self, path: &str) -> Result<Value, AppError> {
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Map non-2xx responses to `AppError::Api` with the body as the message.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

/// User-Agent string identifying this integration to the platform.
fn integration_string() -> String {
    format!("halo-issues/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_string_carries_version() {
        let ua = integration_string();
        assert!(ua.starts_with("halo-issues/"));
        assert_eq!(ua, format!("halo-issues/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn client_builds_from_config() {
        let config = HaloConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_host: "api.cloudpassage.com".to_string(),
            describe_threads: 5,
            critical_only: true,
        };
        let client = HaloClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.cloudpassage.com");
        assert!(client.token.is_empty());
    }

    #[test]
    fn explicit_scheme_in_host_is_kept() {
        let config = HaloConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_host: "http://127.0.0.1:8080/".to_string(),
            describe_threads: 5,
            critical_only: true,
        };
        let client = HaloClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn token_response_deserializes() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok","expires_in":900}"#).unwrap();
        assert_eq!(token.access_token, "tok");
    }

    #[test]
    fn issue_page_defaults_to_empty() {
        let page: IssuePage = serde_json::from_str("{}").unwrap();
        assert!(page.issues.is_empty());
    }
}
