//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::upstream::{Operation, PersistedQuery};

/// Root configuration for the game metadata proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream GraphQL endpoint and client identification.
    pub upstream: UpstreamConfig,

    /// Persisted query hashes registered with the upstream.
    pub queries: QueryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream GraphQL API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// GraphQL GET endpoint.
    pub endpoint: String,

    /// Sent as `apollographql-client-name`.
    pub client_name: String,

    /// Sent as `apollographql-client-version`.
    pub client_version: String,

    /// Sent as `Referer`.
    pub referer: String,

    /// Number of objects requested per search.
    pub search_count: u32,

    /// Region used for detail lookups.
    pub region: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://mollusk.apis.ign.com/graphql".to_string(),
            client_name: "kraken".to_string(),
            client_version: "v0.23.3".to_string(),
            referer: "https://www.ign.com/reviews/games".to_string(),
            search_count: 20,
            region: "ca".to_string(),
        }
    }
}

/// Persisted query hashes, one per upstream operation.
///
/// The upstream only accepts hashes it has pre-registered, so these values
/// are part of the contract with it. Bump them together with the client
/// version when the upstream rotates its query set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// `SearchObjectsByName` (client v0.23.3).
    pub search_objects_by_name: String,

    /// `ObjectSelectByTypeAndSlug` (client v0.23.3).
    pub object_select_by_type_and_slug: String,
}

impl QueryConfig {
    /// Resolve the persisted query for an operation.
    pub fn persisted(&self, operation: Operation) -> PersistedQuery {
        let sha256_hash = match operation {
            Operation::SearchObjectsByName => &self.search_objects_by_name,
            Operation::ObjectSelectByTypeAndSlug => &self.object_select_by_type_and_slug,
        };
        PersistedQuery::new(operation, sha256_hash.clone())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_objects_by_name:
                "664276ed5455a5a05182a25250b11cbe0601a6ecf2e91247d90d34617335d5da".to_string(),
            object_select_by_type_and_slug:
                "c5ceac7141d5e6900705417171625a0d7383ee89056a5b5edaf5f61cb466fb5f".to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,

    /// Upstream connection establishment timeout in seconds.
    pub upstream_connect_secs: u64,

    /// Total upstream request timeout in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_connect_secs: 5,
            upstream_secs: 15,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.upstream.region, "ca");
        assert_eq!(config.upstream.search_count, 20);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [upstream]
            region = "us"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.upstream.region, "us");
        assert_eq!(config.upstream.client_name, "kraken");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_persisted_query_lookup() {
        let queries = QueryConfig::default();
        let search = queries.persisted(Operation::SearchObjectsByName);
        assert_eq!(search.operation, Operation::SearchObjectsByName);
        assert!(search.sha256_hash.starts_with("664276ed"));

        let detail = queries.persisted(Operation::ObjectSelectByTypeAndSlug);
        assert!(detail.sha256_hash.starts_with("c5ceac71"));
    }
}
