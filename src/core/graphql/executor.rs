//! GraphQL request executor.
//!
//! [`GraphQLExecutor`] is the seam between the typed reserves client and the
//! wire. [`HttpExecutor`] is the production implementation: a single POST of
//! `{query, variables}` to `{base_url}/graphql`, followed by envelope checks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::ApiConfig;
use crate::core::graphql::error::{Error, Result};

const GRAPHQL_PATH: &str = "graphql";
const HEALTH_PATH: &str = "health";

/// Executes GraphQL documents against some backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphQLExecutor: Send + Sync {
    /// Run `query` with `variables` and return the envelope's `data` value.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value>;
}

/// Request body sent to the endpoint.
#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// A single entry of the envelope's `errors` list.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLErrorEntry {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

/// The `{data, errors}` envelope returned by the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLErrorEntry>>,
}

impl GraphQLResponse {
    /// Unwrap the envelope: errors win over data.
    pub fn into_result(self) -> Result<Value> {
        match self.errors {
            Some(errors) if !errors.is_empty() => {
                Err(Error::graphql(errors.into_iter().map(|e| e.message)))
            }
            _ => self
                .data
                .ok_or_else(|| Error::MissingField("data".to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP transport for the reserves GraphQL API.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: Url,
    endpoint: Url,
}

impl HttpExecutor {
    /// Build an executor from the `[api]` configuration section.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Self::with_client(client, &config.base_url)
    }

    /// Build an executor around an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let endpoint = base_url
            .join(GRAPHQL_PATH)
            .map_err(|e| Error::Config(format!("Invalid GraphQL endpoint: {e}")))?;

        Ok(Self {
            client,
            base_url,
            endpoint,
        })
    }

    /// The resolved `{base_url}/graphql` endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Probe `GET {base_url}/health`.
    ///
    /// Returns `Ok(true)` when the server reports `"healthy"`.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health_check(&self) -> Result<bool> {
        let url = self
            .base_url
            .join(HEALTH_PATH)
            .map_err(|e| Error::Config(format!("Invalid health endpoint: {e}")))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
            });
        }

        let health: HealthResponse = response.json().await?;
        Ok(health.status == "healthy")
    }

    async fn send(&self, query: &str, variables: &Value) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
            });
        }

        let envelope: GraphQLResponse = response.json().await?;
        envelope.into_result()
    }
}

#[async_trait]
impl GraphQLExecutor for HttpExecutor {
    #[instrument(
        skip(self, query, variables),
        fields(endpoint = %self.endpoint, operation = operation_name(query))
    )]
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        match self.send(query, &variables).await {
            Ok(data) => {
                debug!("GraphQL request succeeded");
                Ok(data)
            }
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), "GraphQL request failed");
                Err(e)
            }
        }
    }
}

/// Extract the operation name from a document (`query Reserves(...)` -> `Reserves`).
pub fn operation_name(query: &str) -> &str {
    let trimmed = query.trim_start();
    let rest = strip_keyword(trimmed, "query")
        .or_else(|| strip_keyword(trimmed, "mutation"))
        .unwrap_or("")
        .trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());

    if end == 0 {
        "anonymous"
    } else {
        &rest[..end]
    }
}

/// Strip `keyword` only when it stands alone (`queryFoo` is not `query`).
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid base URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Unsupported scheme '{}' in base URL",
            url.scheme()
        )));
    }

    // Url::join replaces the last segment unless the path ends in '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
