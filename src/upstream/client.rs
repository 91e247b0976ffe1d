//! Persisted-query GraphQL client.
//!
//! # Responsibilities
//! - Encode operation name, variables and persisted-query extensions
//!   into the GET query string
//! - Attach the client identification headers the upstream expects
//! - Turn transport, status, decoding and GraphQL failures into
//!   `UpstreamError`, logging each one

use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, REFERER};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::upstream::types::{GraphQlResponse, PersistedQuery, UpstreamError, UpstreamResult};

const APOLLO_OPERATION_NAME: &str = "x-apollo-operation-name";
const APOLLO_CLIENT_NAME: &str = "apollographql-client-name";
const APOLLO_CLIENT_VERSION: &str = "apollographql-client-version";

/// HTTP client for the upstream GraphQL endpoint.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: Url,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a client from validated configuration.
    pub fn new(config: &UpstreamConfig, timeouts: &TimeoutConfig) -> UpstreamResult<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            UpstreamError::Setup(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.upstream_connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            config: config.clone(),
        })
    }

    /// Build the request URL for a persisted query.
    ///
    /// Variables and extensions are JSON, percent-encoded as query values.
    pub fn request_url<V: Serialize>(
        &self,
        query: &PersistedQuery,
        variables: &V,
    ) -> UpstreamResult<Url> {
        let variables = serde_json::to_string(variables)?;
        let extensions = serde_json::to_string(&query.extensions())?;

        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "operationName={}&variables={}&extensions={}",
            query.operation,
            urlencoding::encode(&variables),
            urlencoding::encode(&extensions),
        )));
        Ok(url)
    }

    /// Execute a persisted query and return its `data` payload.
    ///
    /// Returns `Ok(None)` when the upstream answered without data.
    pub async fn execute<V, T>(&self, query: &PersistedQuery, variables: &V) -> UpstreamResult<Option<T>>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let result = self.send(query, variables).await;

        let outcome = match &result {
            Ok(Some(_)) => "ok",
            Ok(None) => "empty",
            Err(UpstreamError::GraphQl(_)) => "graphql_error",
            Err(_) => "error",
        };
        metrics::record_upstream_request(query.operation.as_str(), outcome, start);

        result
    }

    async fn send<V, T>(&self, query: &PersistedQuery, variables: &V) -> UpstreamResult<Option<T>>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let operation = query.operation.as_str();
        let url = self.request_url(query, variables)?;

        tracing::debug!(operation = %operation, url = %url, "Dispatching upstream query");

        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(APOLLO_OPERATION_NAME, operation)
            .header(APOLLO_CLIENT_NAME, &self.config.client_name)
            .header(APOLLO_CLIENT_VERSION, &self.config.client_version)
            .header(REFERER, &self.config.referer)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation = %operation, error = %e, "Upstream request error");
                UpstreamError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(operation = %operation, status = %status, "Upstream returned error status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "Failed to read upstream body");
            UpstreamError::Transport(e)
        })?;

        let parsed: GraphQlResponse<T> = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "Failed to decode upstream body");
            UpstreamError::Decode(e)
        })?;

        if let Some(errors) = parsed.errors {
            tracing::error!(operation = %operation, errors = ?errors, "GraphQL errors");
            return Err(UpstreamError::GraphQl(errors));
        }

        Ok(parsed.data)
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("client_name", &self.config.client_name)
            .field("client_version", &self.config.client_version)
            .finish()
    }
}
